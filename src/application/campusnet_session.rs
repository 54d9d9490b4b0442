//! Authenticated CampusNet client
//!
//! One [`CampusNetSession`] corresponds to one portal login. Semesters and
//! modules are fetched on first access and cached for the lifetime of the
//! session; there is no refresh, so callers needing fresh data log in
//! again. Exams and documents are fetched on every call.
//!
//! All requests are issued one at a time in call order. Cache-populating
//! methods take `&mut self`, so a session cannot be shared between tasks
//! without the caller adding its own synchronization.

use tracing::{debug, info};

use super::module_catalog::ModuleCatalog;
use crate::domain::constants::{course_results, portal, programs};
use crate::domain::{Document, Exam, Module, SessionId, Semesters};
use crate::infrastructure::config::{Credentials, PortalConfig};
use crate::infrastructure::http_client::{Charset, HttpClient, PortalTransport};
use crate::infrastructure::parsing::{ContextualParser, PageParser, PortalPages};
use crate::infrastructure::portal_error::PortalResult;
use crate::infrastructure::session_manager::SessionManager;
use crate::infrastructure::url_builder::{Dispatcher, UrlBuilder};

#[derive(Debug)]
pub struct CampusNetSession<T: PortalTransport = HttpClient> {
    transport: T,
    urls: UrlBuilder,
    pages: PortalPages,
    semesters: Option<Semesters>,
    modules: Option<ModuleCatalog>,
}

impl CampusNetSession<HttpClient> {
    /// Logs in with the default configuration (DHBW Dualis).
    pub async fn login(username: &str, password: &str) -> PortalResult<Self> {
        let credentials = Credentials::new(username, password)?;
        Self::login_with_config(&PortalConfig::default(), &credentials).await
    }

    /// Logs in against the portal described by `config`.
    pub async fn login_with_config(config: &PortalConfig, credentials: &Credentials) -> PortalResult<Self> {
        let transport = HttpClient::new(config)?;
        Self::login_with_transport(transport, config, credentials).await
    }
}

impl<T: PortalTransport> CampusNetSession<T> {
    /// Logs in over a caller-supplied transport.
    ///
    /// Base URL and selectors are validated before the login request is sent.
    pub async fn login_with_transport(
        transport: T,
        config: &PortalConfig,
        credentials: &Credentials,
    ) -> PortalResult<Self> {
        let dispatcher = Dispatcher::new(&config.base_url)?;
        let pages = PortalPages::new(&config.selectors)?;

        let session = SessionManager::new()?
            .login(&transport, &dispatcher, credentials)
            .await?;
        info!("Logged in to {}", config.base_url);

        Ok(Self {
            transport,
            urls: UrlBuilder::new(dispatcher, session),
            pages,
            semesters: None,
            modules: None,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        self.urls.session()
    }

    #[must_use]
    pub const fn url_builder(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Semester label -> portal id, in the portal's order. Fetched once.
    pub async fn semesters(&mut self) -> PortalResult<&Semesters> {
        let semesters = match self.semesters.take() {
            Some(cached) => cached,
            None => self.fetch_semesters().await?,
        };
        Ok(&*self.semesters.insert(semesters))
    }

    /// Every module across all semesters, one record per module number.
    /// Fetched once; the first call also loads the semesters.
    pub async fn modules(&mut self) -> PortalResult<&ModuleCatalog> {
        let modules = match self.modules.take() {
            Some(cached) => cached,
            None => {
                let semesters = self.semesters().await?.clone();
                self.fetch_modules(&semesters).await?
            }
        };
        Ok(&*self.modules.insert(modules))
    }

    /// Exams of one module in table order. Not cached.
    pub async fn exams_for_module(&self, module: &Module) -> PortalResult<Vec<Exam>> {
        let url = self
            .urls
            .build(programs::RESULT_DETAILS, &format!(",-N{}", module.id));
        let html = self.transport.get(&url).await?.text(Charset::Utf8);

        let exams = self.pages.exams.parse(&html)?.records;
        debug!("Module {} has {} exams", module.num, exams.len());
        Ok(exams)
    }

    /// Document listing, most recent first as the portal orders it. Not cached.
    pub async fn documents(&self) -> PortalResult<Vec<Document>> {
        let url = self.urls.build(programs::CREATE_DOCUMENT, "");
        let html = self.transport.get(&url).await?.text(Charset::Utf8);

        let documents = self.pages.documents.parse(&html)?.records;
        debug!("Found {} documents", documents.len());
        Ok(documents)
    }

    async fn fetch_semesters(&self) -> PortalResult<Semesters> {
        let url = self.urls.build(programs::COURSE_RESULTS, "");
        let html = self.transport.get(&url).await?.text(Charset::Latin1);

        let semesters = self.pages.semesters.parse(&html)?;
        info!("Loaded {} semesters", semesters.len());
        Ok(semesters)
    }

    async fn fetch_modules(&self, semesters: &Semesters) -> PortalResult<ModuleCatalog> {
        let mut catalog = ModuleCatalog::new();

        for semester in semesters {
            let form = [
                ("APPNAME", portal::APP_NAME),
                ("semester", semester.id.as_str()),
                ("Refresh", course_results::REFRESH),
                ("PRGNAME", programs::COURSE_RESULTS),
                ("ARGUMENTS", course_results::ARGUMENTS),
                ("sessionno", self.urls.session().as_str()),
                ("menuno", course_results::MENU_NO),
            ];
            let html = self
                .transport
                .post_form(self.urls.dispatcher().as_str(), &form)
                .await?
                .text(Charset::Utf8);

            let parsed = self.pages.modules.parse_str(&html, &semester.label)?;
            catalog.extend(parsed.records);
        }

        info!("Loaded {} modules", catalog.len());
        Ok(catalog)
    }
}
