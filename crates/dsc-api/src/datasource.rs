//! Datasource endpoints and their identifiers.
//!
//! Every remote operation is one [`Endpoint`] variant. The variant decides
//! the HTTP method and the path below the service prefix; the
//! [`Client`](crate::client::Client) methods just pick a variant and send it.

use std::fmt;

use reqwest::Method;

/// A datasource, table, or field id as it appears in a URL path.
///
/// Numeric and textual ids are both accepted and written verbatim; the only
/// escaping is what URL parsing applies, so `"x y"` is sent as `x%20y` and a
/// `?` or `#` starts the query or fragment.
///
/// An empty id is rejected by the client with
/// [`ApiError::EmptyIdentifier`](crate::errors::ApiError::EmptyIdentifier)
/// instead of being sent as `.../get/`, which would address the bare
/// endpoint path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// The id as written into the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! identifier_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Identifier {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

identifier_from_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, &str, &String, String
);

impl From<&Identifier> for Identifier {
    fn from(value: &Identifier) -> Self {
        value.clone()
    }
}

/// One remote datasource operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET datasource/list`
    List,
    /// `POST datasource/tableList/{ds_id}`
    TableList(Identifier),
    /// `POST datasource/fieldList/{table_id}`
    FieldList(Identifier),
    /// `POST datasource/previewData/{ds_id}` with a build specification body.
    PreviewData(Identifier),
    /// `POST datasource/saveTable` with table metadata.
    SaveTable,
    /// `POST datasource/saveField` with field metadata.
    SaveField,
    /// `POST datasource/get/{id}`
    Get(Identifier),
    /// `POST datasource/delete/{id}`
    Delete(Identifier),
}

impl Endpoint {
    /// HTTP method of the endpoint.
    pub fn method(&self) -> Method {
        match self {
            Self::List => Method::GET,
            _ => Method::POST,
        }
    }

    /// Fixed part of the path, relative to the service prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "datasource/list",
            Self::TableList(_) => "datasource/tableList",
            Self::FieldList(_) => "datasource/fieldList",
            Self::PreviewData(_) => "datasource/previewData",
            Self::SaveTable => "datasource/saveTable",
            Self::SaveField => "datasource/saveField",
            Self::Get(_) => "datasource/get",
            Self::Delete(_) => "datasource/delete",
        }
    }

    /// The identifier interpolated into the path, if any.
    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::TableList(id)
            | Self::FieldList(id)
            | Self::PreviewData(id)
            | Self::Get(id)
            | Self::Delete(id) => Some(id),
            Self::List | Self::SaveTable | Self::SaveField => None,
        }
    }

    /// Full path relative to the service prefix, identifier included.
    pub fn path(&self) -> String {
        match self.identifier() {
            Some(id) => format!("{}/{id}", self.name()),
            None => self.name().to_string(),
        }
    }

    /// Whether the endpoint expects a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::PreviewData(_) | Self::SaveTable | Self::SaveField)
    }
}
