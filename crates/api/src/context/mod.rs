//! Application context - dependency injection container

use std::sync::Arc;

use anyhow::Context as _;
use partnerhub_common::auth::{SessionStore, TokenManager};
use partnerhub_common::tracking::RequestTracker;
use partnerhub_core::{
    AgentsPort, AgentsSource, CsvImportPort, ImportService, ListViewModel, OrganizationsPort,
    OrganizationsSource, RequestScope, SalesAnalytics, SalesPort, SalesSource, ViewOptions,
};
use partnerhub_domain::constants::{
    COMPONENT_AGENTS, COMPONENT_CSV_IMPORT, COMPONENT_ORGANIZATIONS, COMPONENT_SALES,
    COMPONENT_STOVE_IDS,
};
use partnerhub_domain::{Config, Result};
use partnerhub_infra::{
    to_domain, AgentsClient, ApiClient, AuthApiRefresher, CsvImportClient, FetchOptions,
    HttpClient, OrganizationsClient, SalesClient,
};
use tracing::{debug, info, warn};

use crate::adapters::SharedSessionStore;
use crate::utils::logging::{init_tracing, LogFormat};

/// Token manager as wired by the application
pub type AppTokenManager = TokenManager<AuthApiRefresher, SharedSessionStore>;

/// Every component that issues tracked requests
const COMPONENTS: [&str; 5] = [
    COMPONENT_ORGANIZATIONS,
    COMPONENT_SALES,
    COMPONENT_AGENTS,
    COMPONENT_CSV_IMPORT,
    COMPONENT_STOVE_IDS,
];

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub tokens: Arc<AppTokenManager>,
    pub tracker: Arc<RequestTracker>,

    // Ports, backed by the HTTP clients
    pub organizations: Arc<dyn OrganizationsPort>,
    pub sales: Arc<dyn SalesPort>,
    pub agents: Arc<dyn AgentsPort>,
    pub csv_import: Arc<dyn CsvImportPort>,

    // Services
    pub import: Arc<ImportService>,
    pub analytics: Arc<SalesAnalytics>,

    pub view_options: ViewOptions,
}

impl AppContext {
    /// Wire the context for `config`, keeping the session in `store`.
    ///
    /// No network call is made; call [`initialize`](Self::initialize) to
    /// load a stored session.
    ///
    /// # Errors
    /// `Config` if a base URL is unusable or the HTTP client cannot be built
    pub fn new(config: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let refresher = AuthApiRefresher::new(
            &config.auth,
            config.api.anon_key.clone(),
            config.fetch.timeout(),
        )?;
        let tokens = Arc::new(TokenManager::new(
            refresher,
            Arc::new(SharedSessionStore::new(store)),
            config.auth.refresh_threshold_seconds,
        ));
        let tracker = Arc::new(RequestTracker::new());

        let mut http = HttpClient::builder()
            .token_provider(tokens.clone())
            .tracker(tracker.clone())
            .user_agent(concat!("partnerhub/", env!("CARGO_PKG_VERSION")));
        if let Some(key) = &config.api.anon_key {
            http = http.api_key(key.clone());
        }
        let api = ApiClient::new(
            http.build()?,
            &config.api.base_url,
            FetchOptions::from_config(&config.fetch),
        )?;

        let organizations: Arc<dyn OrganizationsPort> =
            Arc::new(OrganizationsClient::new(api.clone()));
        let sales: Arc<dyn SalesPort> = Arc::new(SalesClient::new(api.clone()));
        let agents: Arc<dyn AgentsPort> = Arc::new(AgentsClient::new(api.clone()));
        let csv_import: Arc<dyn CsvImportPort> = Arc::new(CsvImportClient::new(api));

        let import = Arc::new(ImportService::new(csv_import.clone()));
        let analytics = Arc::new(SalesAnalytics::new(sales.clone()));
        let view_options = ViewOptions::from_config(&config);

        debug!(base_url = %config.api.base_url, "application context wired");

        Ok(Self {
            config,
            tokens,
            tracker,
            organizations,
            sales,
            agents,
            csv_import,
            import,
            analytics,
            view_options,
        })
    }

    /// Load the stored session, if any
    ///
    /// # Returns
    /// `true` if a session was found
    pub async fn initialize(&self) -> Result<bool> {
        let restored = self.tokens.initialize().await.map_err(to_domain)?;
        info!(restored, "PartnerHub context initialized");
        Ok(restored)
    }

    /// Fresh cancellation scope for one command
    pub fn scope(&self, component: &'static str) -> RequestScope {
        RequestScope::new(component)
    }

    pub fn organizations_view(&self) -> ListViewModel<OrganizationsSource> {
        ListViewModel::new(
            OrganizationsSource::new(self.organizations.clone()),
            self.tracker.clone(),
            self.view_options,
        )
    }

    pub fn sales_view(&self) -> ListViewModel<SalesSource> {
        ListViewModel::new(
            SalesSource::new(self.sales.clone()),
            self.tracker.clone(),
            self.view_options,
        )
    }

    pub fn agents_view(&self) -> ListViewModel<AgentsSource> {
        ListViewModel::new(
            AgentsSource::new(self.agents.clone()),
            self.tracker.clone(),
            self.view_options,
        )
    }

    /// Cancel every tracked request (sign-out, host shutdown)
    ///
    /// # Returns
    /// Number of requests cancelled
    pub fn cancel_in_flight(&self) -> usize {
        let cancelled: usize =
            COMPONENTS.iter().map(|component| self.tracker.cancel_all(component)).sum();
        if cancelled > 0 {
            info!(cancelled, "cancelled in-flight requests");
        }
        cancelled
    }
}

/// Host bootstrap: `.env`, logging, configuration, context, stored session.
///
/// `PARTNERHUB_LOG_FORMAT=json` switches logs to JSON lines.
pub async fn bootstrap(store: Arc<dyn SessionStore>) -> anyhow::Result<AppContext> {
    let dotenv = dotenvy::dotenv();

    let format = std::env::var("PARTNERHUB_LOG_FORMAT")
        .map(|value| LogFormat::from_env_value(&value))
        .unwrap_or_default();
    init_tracing(format);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, "no .env file loaded"),
    }

    let config = partnerhub_infra::config::load().context("failed to load configuration")?;
    let ctx = AppContext::new(config, store).context("failed to wire application context")?;

    if !ctx.initialize().await.context("failed to restore session")? {
        warn!("no stored session, sign-in required");
    }
    Ok(ctx)
}
