//! HTTP transport for the portal dispatcher
//!
//! The client core only needs GET, form POST, response headers and a cookie
//! count. [`PortalTransport`] captures exactly that surface so sessions can run
//! against the reqwest-backed [`HttpClient`] or an in-memory stub.

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::config::PortalConfig;
use super::portal_error::{PortalError, PortalResult};

/// Character set used to decode a response body.
///
/// The portal does not label its pages reliably, so every call site states
/// the encoding it expects instead of trusting `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// ISO-8859-1, used by the semester listing
    Latin1,
    Utf8,
}

impl Charset {
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            // ISO-8859-1 maps every byte to the code point of the same value
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Response data the client core looks at
#[derive(Debug, Clone, Default)]
pub struct PortalResponse {
    pub status: u16,
    /// Header names lower-cased; repeated headers keep the last value
    pub headers: HashMap<String, String>,
    /// Number of cookies set by this response
    pub cookie_count: usize,
    pub body: Vec<u8>,
}

impl PortalResponse {
    /// Case-insensitive header lookup
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn text(&self, charset: Charset) -> String {
        charset.decode(&self.body)
    }
}

/// Narrow HTTP surface used by the client core
#[async_trait]
pub trait PortalTransport: Send + Sync {
    async fn get(&self, url: &str) -> PortalResult<PortalResponse>;

    /// POST with an `application/x-www-form-urlencoded` body
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> PortalResult<PortalResponse>;
}

/// reqwest-backed transport with a cookie store, so the portal's session
/// cookie from the login response is replayed on every later request.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &PortalConfig) -> PortalResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| PortalError::Configuration(format!("Invalid user agent: {e}")))?,
        );

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| PortalError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn read_response(url: &str, response: reqwest::Response) -> PortalResult<PortalResponse> {
        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let cookie_count = response.cookies().count();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| PortalError::http(url, e))?
            .to_vec();

        debug!("Received {} bytes from {} ({})", body.len(), url, status);

        Ok(PortalResponse {
            status: status.as_u16(),
            headers,
            cookie_count,
            body,
        })
    }
}

#[async_trait]
impl PortalTransport for HttpClient {
    async fn get(&self, url: &str) -> PortalResult<PortalResponse> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PortalError::http(url, e))?;
        Self::read_response(url, response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> PortalResult<PortalResponse> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| PortalError::http(url, e))?;
        Self::read_response(url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_decodes_umlauts() {
        // "Prüfung" in ISO-8859-1
        let bytes = b"Pr\xfcfung";
        assert_eq!(Charset::Latin1.decode(bytes), "Prüfung");
        assert_eq!(Charset::Utf8.decode("Prüfung".as_bytes()), "Prüfung");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut response = PortalResponse::default();
        response
            .headers
            .insert("refresh".to_string(), "0; URL=/x".to_string());
        assert_eq!(response.header("Refresh"), Some("0; URL=/x"));
        assert_eq!(response.header("REFRESH"), Some("0; URL=/x"));
        assert_eq!(response.header("Location"), None);
    }

    #[test]
    fn test_http_client_creation() {
        assert!(HttpClient::new(&PortalConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_user_agent_is_a_configuration_error() {
        let config = PortalConfig {
            user_agent: "bad\nagent".to_string(),
            ..PortalConfig::default()
        };
        assert!(matches!(
            HttpClient::new(&config),
            Err(PortalError::Configuration(_))
        ));
    }
}
