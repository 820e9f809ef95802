//! Application context passed to every view: API, session, navigation.

use std::sync::Arc;

use crate::api::{AdminApi, ApiClient};
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::guard::{GuardState, Navigator, Route, RouteGuard};
use crate::session::{FileStorage, SessionStore};

pub const LOGIN_HINT: &str = "Not logged in. Run `cbadmin auth login <email>` first.";

pub struct AppContext<A = ApiClient> {
    pub api: A,
    pub session: SessionStore,
    navigator: Navigator,
    guard: RouteGuard,
}

impl AppContext<ApiClient> {
    /// Wire the HTTP client to a file-backed session in the configured directory
    pub fn from_config(config: &AppConfig, base_url: Option<&str>) -> anyhow::Result<Self> {
        let dir = config.config_dir()?;
        let session = SessionStore::new(Arc::new(FileStorage::in_dir(&dir)?));
        let base_url = base_url.unwrap_or(&config.api.base_url);
        let api = ApiClient::new(base_url, session.clone())?
            .with_request_logging(config.api.enable_request_logging);

        tracing::debug!(base_url, config_dir = %dir.display(), "context ready");
        Ok(Self::new(api, session))
    }
}

impl<A: AdminApi> AppContext<A> {
    pub fn new(api: A, session: SessionStore) -> Self {
        let guard = RouteGuard::new(session.clone());
        Self {
            api,
            session,
            navigator: Navigator::default(),
            guard,
        }
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    /// Navigate through the guard; returns the route actually shown
    pub fn navigate(&mut self, route: Route) -> ClientResult<Route> {
        self.guard.navigate(&mut self.navigator, route)
    }

    /// Enter a view, failing with the login hint when the guard redirects away
    pub fn open(&mut self, route: Route) -> ClientResult<Route> {
        let shown = self.navigate(route)?;
        if route.is_protected() && shown == Route::Login {
            return Err(ClientError::new(ErrorKind::Unauthorized, LOGIN_HINT));
        }
        Ok(shown)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.session.clear()?;
        self.navigator.replace(Route::Login);
        self.guard.settle(&mut self.navigator)?;
        tracing::info!("logged out");
        Ok(())
    }
}
