use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::api::format::{item_from_value, list_from_value, success_flag};
use crate::api::AdminApi;
use crate::error::{extract_message, ClientError, ClientResult, ErrorKind};
use crate::session::SessionStore;
use crate::types::{
    AdminAccount, Chatbot, ClientConfig, Company, DashboardStats, LoginRequest, LoginResponse,
    Message, NewAdmin, NewCompany, Plan, RecordId, RenewRequest, Subscription, TokenLimitUpdate,
};

/// HTTP client bound to one API base URL.
///
/// The bearer token is read from the session on every call, never at
/// construction, so a login or logout between calls takes effect at once.
/// No retries, no timeout override, no caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionStore) -> ClientResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::validation(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::validation(format!(
                "API base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            log_requests: false,
        })
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authenticated: bool,
    ) -> ClientResult<reqwest::Response> {
        let url = self.endpoint(path);
        let mut request = self.http.request(method.clone(), &url);

        if authenticated {
            match self.session.get_token()? {
                Some(token) => request = request.bearer_auth(token),
                None => tracing::warn!(%method, path, "no session token for authenticated call"),
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        if self.log_requests {
            tracing::debug!(%method, path, "request");
        }

        let response = request.send().await?;
        let status = response.status();

        if self.log_requests {
            tracing::debug!(%method, path, status = status.as_u16(), "response");
        }

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &text);
        tracing::warn!(%method, path, status = status.as_u16(), kind = ?err.kind, "request rejected");
        Err(err)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authenticated: bool,
    ) -> ClientResult<Value> {
        let response = self.send(method, path, body, authenticated).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ClientError::decode(format!("Unexpected response from {}: {}", path, e)))
    }

    async fn get(&self, path: &str) -> ClientResult<Value> {
        self.call(Method::GET, path, None, true).await
    }

    async fn post(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.call(Method::POST, path, Some(body), true).await
    }

    async fn put(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.call(Method::PUT, path, Some(body), true).await
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(ClientError::from)
}

/// A 2xx body that still says `"success": false` is a failure
fn reject_unsuccessful(body: &Value, fallback: &str) -> ClientResult<()> {
    if success_flag(body) == Some(false) {
        let message = extract_message(&body.to_string()).unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::new(ErrorKind::Server, message));
    }
    Ok(())
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let body = self
            .call(Method::POST, "/admin/login", Some(&to_body(request)?), false)
            .await?;
        let response: LoginResponse = serde_json::from_value(body)
            .map_err(|e| ClientError::decode(format!("Login response had no token: {}", e)))?;
        if response.token.is_empty() {
            return Err(ClientError::decode("Login response had an empty token"));
        }
        Ok(response)
    }

    async fn stats(&self) -> ClientResult<DashboardStats> {
        let body = self.get("/admin/stats").await?;
        serde_json::from_value(body).map_err(|e| ClientError::decode(format!("could not decode stats: {}", e)))
    }

    async fn list_admins(&self) -> ClientResult<Vec<AdminAccount>> {
        let body = self.get("/admin/all").await?;
        if success_flag(&body) == Some(false) {
            return Ok(Vec::new());
        }
        list_from_value(body, "admins")
    }

    async fn create_admin(&self, admin: &NewAdmin) -> ClientResult<()> {
        let body = self.post("/admin/create", &to_body(admin)?).await?;
        reject_unsuccessful(&body, "Failed to create admin.")
    }

    async fn list_companies(&self) -> ClientResult<Vec<Company>> {
        list_from_value(self.get("/company/all").await?, "companies")
    }

    async fn create_company(&self, company: &NewCompany) -> ClientResult<()> {
        let body = self.post("/company/create", &to_body(company)?).await?;
        reject_unsuccessful(&body, "Failed to create company.")
    }

    async fn list_chatbots(&self) -> ClientResult<Vec<Chatbot>> {
        list_from_value(self.get("/chatbot/all").await?, "chatbots")
    }

    async fn update_token_limit(&self, id: &RecordId, token_limit: u64) -> ClientResult<()> {
        let path = format!("/chatbot/update-token-limit/{}", id);
        self.put(&path, &to_body(&TokenLimitUpdate { token_limit })?).await?;
        Ok(())
    }

    async fn messages(&self, id: &RecordId) -> ClientResult<Vec<Message>> {
        let path = format!("/chatbot/messages/{}", id);
        list_from_value(self.get(&path).await?, "messages")
    }

    async fn download_report(&self, id: &RecordId) -> ClientResult<Vec<u8>> {
        let path = format!("/report/download/{}", id);
        let response = self.send(Method::GET, &path, None, true).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn list_plans(&self) -> ClientResult<Vec<Plan>> {
        list_from_value(self.get("/plans").await?, "plans")
    }

    async fn subscription(&self, id: &RecordId) -> ClientResult<Option<Subscription>> {
        let path = format!("/chatbot/{}/subscription", id);
        item_from_value(self.get(&path).await?, "subscription")
    }

    async fn renew_subscription(&self, id: &RecordId, request: &RenewRequest) -> ClientResult<()> {
        let path = format!("/chatbot/{}/renew", id);
        let body = self.post(&path, &to_body(request)?).await?;
        reject_unsuccessful(&body, "Failed to renew subscription.")
    }

    async fn client_config(&self, id: &RecordId) -> ClientResult<ClientConfig> {
        let path = format!("/chatbot/{}/config", id);
        self.get(&path).await
    }

    async fn update_client_config(&self, id: &RecordId, config: &ClientConfig) -> ClientResult<ClientConfig> {
        let path = format!("/chatbot/{}/config", id);
        self.put(&path, config).await
    }
}
