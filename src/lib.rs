//! CampusNet - client for CampusNet-based university portals (DHBW Dualis)
//!
//! Logs in with a student's credentials and scrapes semesters, module
//! results, exam results and the document listing into typed records.
//!
//! ```no_run
//! # async fn run() -> campusnet::PortalResult<()> {
//! let mut session = campusnet::CampusNetSession::login("student", "secret").await?;
//! for module in session.modules().await?.iter() {
//!     println!("{} {} {:?}", module.num, module.name, module.grade);
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use application::{CampusNetSession, ModuleCatalog};
pub use domain::{Document, Exam, Module, Semester, Semesters, SessionId};
pub use infrastructure::{
    ConfigManager, Credentials, HttpClient, LoggingConfig, LoginError, ParsingError, PortalConfig,
    PortalError, PortalResult, PortalTransport, init_logging, init_logging_with_config,
};
