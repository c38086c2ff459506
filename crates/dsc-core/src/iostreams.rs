//! Terminal I/O abstraction layer.
//!
//! Handles TTY detection, color support, stdin access, and output capture
//! for testing.

use std::io::{self, IsTerminal, Read, Write};
use std::sync::{Arc, Mutex};

/// Writer wrapper that supports both real I/O and buffered capture.
///
/// In system mode, writes go to real stdout/stderr.
/// In test mode, writes are captured to an in-memory buffer.
struct OutputWriter(Box<dyn Write + Send>);

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Writer that shares a buffer with test code via `Arc<Mutex<Vec<u8>>>`.
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captured test output that can be inspected after command execution.
#[derive(Debug, Clone)]
pub struct TestOutput {
    out_buf: Arc<Mutex<Vec<u8>>>,
    err_buf: Arc<Mutex<Vec<u8>>>,
}

impl TestOutput {
    /// Get the captured stdout content as a string.
    pub fn stdout(&self) -> String {
        let buf = self
            .out_buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Get the captured stderr content as a string.
    pub fn stderr(&self) -> String {
        let buf = self
            .err_buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }
}

/// I/O streams for terminal interaction.
///
/// Commands should use `println_out()` / `println_err()` instead of
/// `println!()` / `eprintln!()` so output can be captured in tests, and
/// `read_stdin()` instead of `std::io::stdin()` so input can be injected.
pub struct IOStreams {
    stdin_is_tty: bool,
    stdout_is_tty: bool,
    stderr_is_tty: bool,
    color_forced: Option<bool>,
    never_prompt: bool,

    stdin: Mutex<Box<dyn Read + Send>>,
    out: Arc<Mutex<OutputWriter>>,
    err: Arc<Mutex<OutputWriter>>,
}

impl std::fmt::Debug for IOStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IOStreams")
            .field("stdin_is_tty", &self.stdin_is_tty)
            .field("stdout_is_tty", &self.stdout_is_tty)
            .field("stderr_is_tty", &self.stderr_is_tty)
            .field("color_forced", &self.color_forced)
            .field("never_prompt", &self.never_prompt)
            .finish_non_exhaustive()
    }
}

impl IOStreams {
    /// Create `IOStreams` for the real terminal.
    pub fn system() -> Self {
        Self {
            stdin_is_tty: io::stdin().is_terminal(),
            stdout_is_tty: io::stdout().is_terminal(),
            stderr_is_tty: io::stderr().is_terminal(),
            color_forced: std::env::var("NO_COLOR").ok().map(|_| false),
            never_prompt: false,
            stdin: Mutex::new(Box::new(io::stdin())),
            out: Arc::new(Mutex::new(OutputWriter(Box::new(io::stdout())))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(io::stderr())))),
        }
    }

    /// Create `IOStreams` for testing with output captured to buffers.
    ///
    /// Stdin is empty until [`set_stdin`](Self::set_stdin) is called.
    ///
    /// # Example
    ///
    /// ```
    /// use dsc_core::IOStreams;
    ///
    /// let (ios, output) = IOStreams::test_with_output();
    /// ios.println_out("hello");
    /// assert_eq!(output.stdout(), "hello\n");
    /// ```
    pub fn test_with_output() -> (Self, TestOutput) {
        let out_buf = Arc::new(Mutex::new(Vec::<u8>::new()));
        let err_buf = Arc::new(Mutex::new(Vec::<u8>::new()));

        let ios = Self {
            stdin_is_tty: false,
            stdout_is_tty: false,
            stderr_is_tty: false,
            color_forced: Some(false),
            never_prompt: true,
            stdin: Mutex::new(Box::new(io::empty())),
            out: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                out_buf.clone(),
            ))))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                err_buf.clone(),
            ))))),
        };

        let output = TestOutput { out_buf, err_buf };

        (ios, output)
    }

    /// Replace stdin with the given content (for test configuration).
    pub fn set_stdin(&mut self, content: impl Into<String>) {
        self.stdin = Mutex::new(Box::new(io::Cursor::new(content.into().into_bytes())));
    }

    /// Set the stdin TTY state (for test configuration).
    pub fn set_stdin_tty(&mut self, is_tty: bool) {
        self.stdin_is_tty = is_tty;
    }

    /// Set the stdout TTY state (for test configuration).
    pub fn set_stdout_tty(&mut self, is_tty: bool) {
        self.stdout_is_tty = is_tty;
    }

    /// Disable or enable interactive prompts.
    pub fn set_never_prompt(&mut self, never: bool) {
        self.never_prompt = never;
    }

    // --- Input ---

    /// Read all of stdin into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or is not UTF-8.
    pub fn read_stdin(&self) -> io::Result<String> {
        let mut reader = self
            .stdin
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Ok(buf)
    }

    // --- Output methods ---

    /// Write a string to stdout followed by a newline.
    pub fn println_out(&self, s: &str) {
        let mut w = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = writeln!(w, "{s}");
    }

    /// Write a string to stderr followed by a newline.
    pub fn println_err(&self, s: &str) {
        let mut w = self
            .err
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = writeln!(w, "{s}");
    }

    /// Write formatted output to stdout with trailing newline.
    pub fn writeln_out(&self, args: std::fmt::Arguments<'_>) {
        let mut w = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = w.write_fmt(args);
        let _ = w.write_all(b"\n");
    }

    /// Write formatted output to stderr with trailing newline.
    pub fn writeln_err(&self, args: std::fmt::Arguments<'_>) {
        let mut w = self
            .err
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = w.write_fmt(args);
        let _ = w.write_all(b"\n");
    }

    // --- Query methods ---

    /// Whether color output is enabled.
    pub fn color_enabled(&self) -> bool {
        if let Some(forced) = self.color_forced {
            return forced;
        }
        self.stdout_is_tty
    }

    /// Check if interactive mode is available (stdin and stdout are TTY, prompts not disabled).
    pub fn can_prompt(&self) -> bool {
        self.stdin_is_tty && self.stdout_is_tty && !self.never_prompt
    }

    /// Create a `ColorScheme` based on the current color settings.
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color_enabled(),
        }
    }
}

/// Terminal color scheme for themed output.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    /// Apply bold styling.
    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Apply success (green) styling.
    pub fn success(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style for successful icon.
    pub fn success_icon(&self) -> String {
        self.success("✓")
    }
}

/// Write to IOStreams stdout with newline, similar to `println!()`.
#[macro_export]
macro_rules! ios_println {
    ($ios:expr) => {
        $ios.println_out("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_out(format_args!($($arg)*))
    };
}

/// Write to IOStreams stderr with newline, similar to `eprintln!()`.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr) => {
        $ios.println_err("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_test_streams_with_no_tty() {
        let (ios, _) = IOStreams::test_with_output();
        assert!(!ios.color_enabled());
        assert!(!ios.can_prompt());
    }

    #[test]
    fn test_should_capture_stdout_and_stderr() {
        let (ios, output) = IOStreams::test_with_output();
        ios.println_out("hello world");
        ios.println_err("error message");
        assert_eq!(output.stdout(), "hello world\n");
        assert_eq!(output.stderr(), "error message\n");
    }

    #[test]
    fn test_should_capture_macro_output() {
        let (ios, output) = IOStreams::test_with_output();
        ios_println!(ios, "count: {}", 42);
        ios_eprintln!(ios, "{} done", "load");
        assert_eq!(output.stdout(), "count: 42\n");
        assert_eq!(output.stderr(), "load done\n");
    }

    #[test]
    fn test_should_read_injected_stdin() {
        let (mut ios, _) = IOStreams::test_with_output();
        assert_eq!(ios.read_stdin().unwrap(), "");
        ios.set_stdin("{\"limit\":10}\n");
        assert_eq!(ios.read_stdin().unwrap(), "{\"limit\":10}\n");
    }

    #[test]
    fn test_should_prompt_only_with_ttys_and_prompts_enabled() {
        let (mut ios, _) = IOStreams::test_with_output();
        ios.set_stdin_tty(true);
        ios.set_stdout_tty(true);
        assert!(!ios.can_prompt());
        ios.set_never_prompt(false);
        assert!(ios.can_prompt());
    }

    #[test]
    fn test_should_not_style_when_colors_disabled() {
        let cs = ColorScheme { enabled: false };
        assert_eq!(cs.bold("x"), "x");
        assert_eq!(cs.success("ok"), "ok");
        assert_eq!(cs.success_icon(), "✓");
    }
}
