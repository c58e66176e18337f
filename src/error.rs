use std::time::Duration;

use chromiumoxide::error::CdpError;
use rust_xlsxwriter::XlsxError;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Failures a scrape, conversion or export attempt can run into.
///
/// None of these escape the attempt boundary in normal operation: the
/// collector, the search flow and the converter log them and hand back an
/// empty or partial result instead.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The browser landed on a page whose title does not contain the expected fragment.
    #[error("expected page title containing '{expected}', got '{actual}'")]
    NavigationMismatch { expected: String, actual: String },

    /// The selector did not match anything before the wait timed out.
    #[error("element '{selector}' not present after {timeout:?}")]
    ElementNotFound { selector: String, timeout: Duration },

    #[error("browser error: {0}")]
    Browser(#[from] CdpError),

    /// A script ran but returned something the caller could not use.
    #[error("script error: {0}")]
    Script(String),

    #[error("pricing API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("pricing API returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to write CSV: {0}")]
    Write(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] XlsxError),

    #[error("refusing to export an empty record set")]
    EmptyExport,
}
