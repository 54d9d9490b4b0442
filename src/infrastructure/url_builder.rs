//! Portal URL construction
//!
//! Every page of the portal is served by one dispatcher script and selected
//! through query arguments:
//!
//! ```text
//! <base>/scripts/mgrqispi.dll?APPNAME=CampusNet&PRGNAME=<program>&ARGUMENTS=-N<session>,-N<menu><extra>
//! ```

use url::Url;

use super::portal_error::{PortalError, PortalResult};
use crate::domain::SessionId;
use crate::domain::constants::portal;

/// Absolute dispatcher URL for a base URL
///
/// Validated once so later URL building cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher(String);

impl Dispatcher {
    pub fn new(base_url: &str) -> PortalResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| PortalError::Configuration(format!("Invalid base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PortalError::Configuration(format!(
                "Base URL must be http(s): {base_url}"
            )));
        }

        let endpoint = if base_url.ends_with('/') {
            format!("{base_url}{}", portal::DISPATCH_PATH)
        } else {
            format!("{base_url}/{}", portal::DISPATCH_PATH)
        };
        Ok(Self(endpoint))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Builds session-bound dispatcher URLs
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    dispatcher: Dispatcher,
    session: SessionId,
}

impl UrlBuilder {
    #[must_use]
    pub const fn new(dispatcher: Dispatcher, session: SessionId) -> Self {
        Self {
            dispatcher,
            session,
        }
    }

    /// URL for `program` under the default `CampusNet` application.
    ///
    /// `extra_args` is appended verbatim after the menu id, e.g. `",-N377662437613542"`.
    #[must_use]
    pub fn build(&self, program_name: &str, extra_args: &str) -> String {
        self.build_for_app(program_name, extra_args, portal::APP_NAME)
    }

    #[must_use]
    pub fn build_for_app(&self, program_name: &str, extra_args: &str, application_name: &str) -> String {
        format!(
            "{}?APPNAME={}&PRGNAME={}&ARGUMENTS=-N{},-N{}{}",
            self.dispatcher.as_str(),
            application_name,
            program_name,
            self.session,
            portal::HOME_MENU_ID,
            extra_args
        )
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub fn session(&self) -> &SessionId {
        &self.session
    }
}
