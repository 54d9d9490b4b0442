//! Portal login and session id extraction
//!
//! A successful `LOGINCHECK` answers with a `Refresh` header pointing at the
//! start page:
//!
//! ```text
//! 0; URL=/scripts/mgrqispi.dll?APPNAME=CampusNet&PRGNAME=STARTPAGE_DISPATCH&ARGUMENTS=-N954433323189667,-N000019,-N000000000000000
//! ```
//!
//! The first `-N` group is the session id, followed by the menu id and
//! temporary arguments.

use regex::Regex;
use tracing::{debug, info, warn};

use super::config::Credentials;
use super::http_client::PortalTransport;
use super::portal_error::{LoginError, PortalError, PortalResult};
use super::url_builder::Dispatcher;
use crate::domain::SessionId;
use crate::domain::constants::{login, portal, programs};

/// Performs the login handshake
#[derive(Debug)]
pub struct SessionManager {
    refresh_pattern: Regex,
}

impl SessionManager {
    pub fn new() -> PortalResult<Self> {
        Ok(Self {
            refresh_pattern: Regex::new(r"^.*-N(\d+),-N(\d+),-N(\d+)$")
                .map_err(|e| PortalError::Configuration(e.to_string()))?,
        })
    }

    /// Submits the credentials and returns the session id the portal issued.
    ///
    /// No retries: a failed login is reported immediately.
    pub async fn login<T: PortalTransport + ?Sized>(
        &self,
        transport: &T,
        dispatcher: &Dispatcher,
        credentials: &Credentials,
    ) -> PortalResult<SessionId> {
        info!("Logging in as {}", credentials.username());

        let form = [
            ("usrname", credentials.username()),
            ("pass", credentials.password()),
            ("APPNAME", portal::APP_NAME),
            ("PRGNAME", programs::LOGIN_CHECK),
            ("ARGUMENTS", login::ARGUMENTS),
            ("clino", login::CLIENT_NO),
            ("menuno", login::MENU_NO),
            ("menu_type", login::MENU_TYPE),
            ("browser", ""),
            ("platform", ""),
        ];
        let response = transport.post_form(dispatcher.as_str(), &form).await?;

        // Status is 200 for rejected credentials too; the cookie is the signal.
        if response.cookie_count == 0 {
            warn!("Login rejected for {}", credentials.username());
            return Err(LoginError::NoSessionCookie.into());
        }

        let refresh = response
            .header("Refresh")
            .ok_or(LoginError::MissingRefreshHeader)?;
        let session = self.session_from_refresh(refresh)?;

        debug!("Session established: {}", session);
        Ok(session)
    }

    /// Extracts the session id from a `Refresh` header value.
    pub fn session_from_refresh(&self, refresh: &str) -> Result<SessionId, LoginError> {
        self.refresh_pattern
            .captures(refresh.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|m| SessionId::parse(m.as_str()))
            .ok_or_else(|| LoginError::MalformedRefreshHeader(refresh.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::PortalResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct LoginStub {
        response: PortalResponse,
        seen_form: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl PortalTransport for LoginStub {
        async fn get(&self, _url: &str) -> PortalResult<PortalResponse> {
            unreachable!("login only posts")
        }

        async fn post_form(&self, _url: &str, form: &[(&str, &str)]) -> PortalResult<PortalResponse> {
            *self.seen_form.lock().unwrap() = form
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            Ok(self.response.clone())
        }
    }

    fn stub(refresh: Option<&str>, cookie_count: usize) -> LoginStub {
        let mut response = PortalResponse {
            status: 200,
            cookie_count,
            ..PortalResponse::default()
        };
        if let Some(refresh) = refresh {
            response
                .headers
                .insert("refresh".to_string(), refresh.to_string());
        }
        LoginStub {
            response,
            seen_form: Mutex::new(Vec::new()),
        }
    }

    const REFRESH: &str = "0; URL=/scripts/mgrqispi.dll?APPNAME=CampusNet&PRGNAME=STARTPAGE_DISPATCH&ARGUMENTS=-N954433323189667,-N000019,-N000000000000000";

    fn credentials() -> Credentials {
        Credentials::new("s212689@student.dhbw-mannheim.de", "secret").unwrap()
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new("https://dualis.dhbw.de/").unwrap()
    }

    #[test]
    fn test_session_is_first_numeric_group() {
        let manager = SessionManager::new().unwrap();
        let session = manager.session_from_refresh(REFRESH).unwrap();
        assert_eq!(session.as_str(), "954433323189667");
    }

    #[test]
    fn test_malformed_refresh_is_rejected() {
        let manager = SessionManager::new().unwrap();
        assert!(matches!(
            manager.session_from_refresh("0; URL=/scripts/mgrqispi.dll?PRGNAME=EXTERNALPAGES"),
            Err(LoginError::MalformedRefreshHeader(_))
        ));
    }

    #[tokio::test]
    async fn test_login_sends_protocol_fields() {
        let manager = SessionManager::new().unwrap();
        let transport = stub(Some(REFRESH), 1);

        let session = manager
            .login(&transport, &dispatcher(), &credentials())
            .await
            .unwrap();
        assert_eq!(session.as_str(), "954433323189667");

        let form = transport.seen_form.lock().unwrap().clone();
        let field = |name: &str| {
            form.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(field("usrname").as_deref(), Some("s212689@student.dhbw-mannheim.de"));
        assert_eq!(field("pass").as_deref(), Some("secret"));
        assert_eq!(field("PRGNAME").as_deref(), Some("LOGINCHECK"));
        assert_eq!(field("clino").as_deref(), Some("000000000000001"));
        assert_eq!(field("menuno").as_deref(), Some("000324"));
        assert_eq!(field("menu_type").as_deref(), Some("classic"));
        assert_eq!(field("browser").as_deref(), Some(""));
        assert_eq!(field("platform").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_missing_cookie_fails_even_with_refresh_header() {
        let manager = SessionManager::new().unwrap();
        let transport = stub(Some(REFRESH), 0);

        let err = manager
            .login(&transport, &dispatcher(), &credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Login(LoginError::NoSessionCookie)));
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn test_missing_refresh_header_fails() {
        let manager = SessionManager::new().unwrap();
        let transport = stub(None, 1);

        let err = manager
            .login(&transport, &dispatcher(), &credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Login(LoginError::MissingRefreshHeader)));
    }
}
