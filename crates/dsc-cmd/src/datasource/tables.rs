//! `dsc datasource tables` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// List the tables of a datasource.
#[derive(Debug, Args)]
pub struct TablesArgs {
    /// Datasource id.
    #[arg(value_name = "DS_ID")]
    ds_id: String,
}

impl TablesArgs {
    /// Run the datasource tables command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let client = factory.datasource_client()?;
        let resp = client.list_tables(self.ds_id.as_str()).await?;
        super::print_response(factory, resp).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_helpers::{TestHarness, mock_service};

    #[tokio::test]
    async fn test_should_list_tables_of_datasource() {
        let h = TestHarness::new().await;
        mock_service(
            &h.server,
            "POST",
            "datasource/tableList/7",
            200,
            json!({"data": [{"name": "orders"}]}),
        )
        .await;

        let args = TablesArgs {
            ds_id: "7".to_string(),
        };
        args.run(&h.factory).await.unwrap();
        assert!(h.stdout().contains("orders"));

        let requests = h.requests().await;
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_empty_id_without_request() {
        let h = TestHarness::new().await;
        let args = TablesArgs {
            ds_id: String::new(),
        };
        let err = args.run(&h.factory).await.unwrap_err();
        assert!(err.to_string().contains("empty identifier"));
        assert!(h.requests().await.is_empty());
    }
}
