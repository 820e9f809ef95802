pub mod client;
pub mod format;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{
    AdminAccount, Chatbot, ClientConfig, Company, DashboardStats, LoginRequest, LoginResponse,
    Message, NewAdmin, NewCompany, Plan, RecordId, RenewRequest, Subscription,
};

/// Every remote operation the admin views need.
///
/// `ApiClient` is the HTTP implementation; view controllers take any
/// implementor so they can run against an in-memory fake.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `POST /admin/login` (unauthenticated)
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    /// `GET /admin/stats`
    async fn stats(&self) -> ClientResult<DashboardStats>;

    /// `GET /admin/all`
    async fn list_admins(&self) -> ClientResult<Vec<AdminAccount>>;

    /// `POST /admin/create`
    async fn create_admin(&self, admin: &NewAdmin) -> ClientResult<()>;

    /// `GET /company/all`
    async fn list_companies(&self) -> ClientResult<Vec<Company>>;

    /// `POST /company/create`
    async fn create_company(&self, company: &NewCompany) -> ClientResult<()>;

    /// `GET /chatbot/all`
    async fn list_chatbots(&self) -> ClientResult<Vec<Chatbot>>;

    /// `PUT /chatbot/update-token-limit/:id`
    async fn update_token_limit(&self, id: &RecordId, token_limit: u64) -> ClientResult<()>;

    /// `GET /chatbot/messages/:id`
    async fn messages(&self, id: &RecordId) -> ClientResult<Vec<Message>>;

    /// `GET /report/download/:id`, raw bytes
    async fn download_report(&self, id: &RecordId) -> ClientResult<Vec<u8>>;

    /// `GET /plans`
    async fn list_plans(&self) -> ClientResult<Vec<Plan>>;

    /// `GET /chatbot/:id/subscription`
    async fn subscription(&self, id: &RecordId) -> ClientResult<Option<Subscription>>;

    /// `POST /chatbot/:id/renew`
    async fn renew_subscription(&self, id: &RecordId, request: &RenewRequest) -> ClientResult<()>;

    /// `GET /chatbot/:id/config`
    async fn client_config(&self, id: &RecordId) -> ClientResult<ClientConfig>;

    /// `PUT /chatbot/:id/config`
    async fn update_client_config(&self, id: &RecordId, config: &ClientConfig) -> ClientResult<ClientConfig>;
}
