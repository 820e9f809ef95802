use serde::Serialize;

use crate::api::AdminApi;
use crate::context::AppContext;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::guard::Route;
use crate::types::LoginRequest;

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// `Failure` behaves like `Idle` for the next submit; it only keeps the message around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LoginState {
    Idle,
    Submitting,
    Success,
    Failure { message: String },
}

#[derive(Debug)]
pub struct LoginFlow {
    state: LoginState,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFlow {
    pub fn new() -> Self {
        Self {
            state: LoginState::Idle,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !matches!(self.state, LoginState::Submitting)
    }

    /// Exchange credentials for a token, store it, and move to the dashboard.
    /// Returns the route shown afterwards.
    pub async fn submit<A: AdminApi>(
        &mut self,
        ctx: &mut AppContext<A>,
        email: &str,
        password: &str,
    ) -> ClientResult<Route> {
        if !self.can_submit() {
            return Err(ClientError::validation("A login is already in progress."));
        }

        if email.trim().is_empty() || password.is_empty() {
            return Err(self.fail(ClientError::validation("Email and password are required.")));
        }

        self.state = LoginState::Submitting;
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = match ctx.api.login(&request).await {
            Ok(response) => response,
            Err(err) => return Err(self.fail(err)),
        };

        if let Err(err) = ctx.session.set_session(&response.token, true) {
            return Err(self.fail(err));
        }

        self.state = LoginState::Success;
        tracing::info!(email = %request.email, "login succeeded");
        ctx.navigate(Route::Dashboard)
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        let message = match err.kind {
            ErrorKind::Transport | ErrorKind::Decode => LOGIN_FAILED.to_string(),
            _ => err.user_message_or(LOGIN_FAILED).to_string(),
        };
        tracing::warn!(kind = ?err.kind, "login failed: {}", message);
        self.state = LoginState::Failure {
            message: message.clone(),
        };
        ClientError { message, ..err }
    }
}
