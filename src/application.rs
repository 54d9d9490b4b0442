//! Application layer
//!
//! The authenticated session and the module catalog it builds from the
//! per-semester result pages.

pub mod campusnet_session;
pub mod module_catalog;

pub use campusnet_session::CampusNetSession;
pub use module_catalog::ModuleCatalog;
