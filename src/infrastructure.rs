//! Infrastructure layer for HTTP transport, login, HTML parsing and configuration
//!
//! Everything that touches the network, the portal's markup or the local
//! filesystem lives here. The application layer only sees the
//! [`PortalTransport`] seam and the page parsers.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod portal_error;
pub mod session_manager;
pub mod url_builder;

pub use config::{ConfigManager, Credentials, LoggingConfig, PageSelectors, PortalConfig};
pub use http_client::{Charset, HttpClient, PortalResponse, PortalTransport};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing_error::{ParsingError, ParsingResult};
pub use portal_error::{LoginError, PortalError, PortalResult};
pub use session_manager::SessionManager;
pub use url_builder::{Dispatcher, UrlBuilder};
