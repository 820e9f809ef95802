//! Routes, navigation history and the authorization gate in front of them.

use std::fmt;

use serde::Serialize;

use crate::error::ClientResult;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Dashboard,
    Overview,
    Companies,
    Chatbots,
    AddAdmin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
            Route::Overview => "/dashboard/overview",
            Route::Companies => "/dashboard/companies",
            Route::Chatbots => "/dashboard/chatbots",
            Route::AddAdmin => "/dashboard/add-admin",
        }
    }

    /// Resolve a path; anything unrecognised lands on the login route
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/dashboard/overview" => Route::Overview,
            "/dashboard/companies" => Route::Companies,
            "/dashboard/chatbots" => Route::Chatbots,
            "/dashboard/add-admin" => Route::AddAdmin,
            _ => Route::Login,
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// History stack with push and replace, like a browser's
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self { history: vec![start] }
    }

    pub fn current(&self) -> Route {
        // history is never empty: created with one entry, `back` keeps the last
        self.history.last().copied().unwrap_or(Route::Login)
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn push(&mut self, route: Route) {
        self.history.push(route);
    }

    pub fn replace(&mut self, route: Route) {
        match self.history.last_mut() {
            Some(last) => *last = route,
            None => self.history.push(route),
        }
    }

    /// Step back one entry. The first entry is never popped.
    pub fn back(&mut self) -> Route {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.current()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Checking,
    Allowed,
    Denied,
}

/// Checks the session on every entry into a protected route.
///
/// There is no listener on the storage: a session cleared elsewhere is only
/// noticed at the next navigation.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Navigate to `route`, applying the index redirect and the session check.
    /// Returns the route actually shown.
    pub fn navigate(&mut self, nav: &mut Navigator, route: Route) -> ClientResult<Route> {
        nav.push(route);
        self.settle(nav)
    }

    /// Run the check for whatever route `nav` currently shows
    pub fn settle(&mut self, nav: &mut Navigator) -> ClientResult<Route> {
        let route = nav.current();
        if !route.is_protected() {
            self.state = GuardState::Allowed;
            return Ok(route);
        }

        self.state = GuardState::Checking;
        if self.session.is_authenticated()? {
            self.state = GuardState::Allowed;
            if route == Route::Dashboard {
                nav.replace(Route::Overview);
            }
        } else {
            self.state = GuardState::Denied;
            tracing::info!(route = %route, "no admin session, redirecting to login");
            nav.replace(Route::Login);
        }

        Ok(nav.current())
    }
}
