//! Error types surfaced by the portal client

use thiserror::Error;

use super::parsing_error::ParsingError;

/// Authentication failed; no session was established.
///
/// The portal answers HTTP 200 for good and bad credentials alike, so these
/// are derived from the response headers rather than the status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login failed: portal did not set a session cookie")]
    NoSessionCookie,

    #[error("Login failed: response carries no Refresh header")]
    MissingRefreshHeader,

    #[error("Login failed: unexpected Refresh header '{0}'")]
    MalformedRefreshHeader(String),
}

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("{0} is empty")]
    MissingCredential(&'static str),

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP request failed: {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl PortalError {
    pub fn http(url: &str, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.to_string(),
            source,
        }
    }

    /// True for failures caused by the credentials rather than the transport or page layout.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::MissingCredential(_) | Self::Login(_))
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
