use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::types::{
    AdminAccount, Chatbot, ClientConfig, Company, DashboardStats, LoginRequest, LoginResponse,
    Message, NewAdmin, NewCompany, Plan, RecordId, RenewRequest, Sender, Subscription,
};

pub const VALID_EMAIL: &str = "a@x.com";
pub const VALID_PASSWORD: &str = "pw";
pub const ISSUED_TOKEN: &str = "fake-token";

/// In-memory stand-in for the admin API, recording every call it receives
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

#[derive(Default)]
pub struct FakeState {
    pub calls: Vec<String>,
    pub admins: Vec<AdminAccount>,
    pub companies: Vec<Company>,
    pub chatbots: Vec<Chatbot>,
    pub messages: HashMap<RecordId, Vec<Message>>,
    pub plans: Vec<Plan>,
    pub subscriptions: HashMap<RecordId, Subscription>,
    pub configs: HashMap<RecordId, Value>,
    pub failing_subscriptions: HashSet<RecordId>,
    /// Returned (once) by the next call instead of doing the work
    pub fail_next: Option<ClientError>,
}

pub fn chatbot(id: &str, name: &str, limit: Option<u64>, used: Option<u64>) -> Chatbot {
    Chatbot {
        id: RecordId::from(id),
        name: name.to_string(),
        company_name: Some("Acme".to_string()),
        company_url: Some("acme.io".to_string()),
        token_limit: limit,
        used_tokens: used,
        total_messages: Some(10),
        unique_users: Some(3),
    }
}

pub fn plan(id: &str, name: &str) -> Plan {
    Plan {
        id: RecordId::from(id),
        name: name.to_string(),
        duration_days: Some(30),
        max_users: Some(100),
        price: None,
    }
}

pub fn message(id: u32, sender: Sender, content: &str) -> Message {
    Message {
        id: RecordId::from(id.to_string()),
        sender,
        content: content.to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, id % 60).unwrap(),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chatbots(chatbots: Vec<Chatbot>) -> Self {
        let fake = Self::new();
        fake.state().chatbots = chatbots;
        fake
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn fail_next(&self, err: ClientError) {
        self.state().fail_next = Some(err);
    }

    fn begin(&self, call: String) -> ClientResult<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        drop(self.begin("POST /admin/login".into())?);
        if request.email == VALID_EMAIL && request.password == VALID_PASSWORD {
            Ok(LoginResponse { token: ISSUED_TOKEN.into() })
        } else {
            Err(ClientError::from_response(401, r#"{"message":"Invalid email or password"}"#))
        }
    }

    async fn stats(&self) -> ClientResult<DashboardStats> {
        let state = self.begin("GET /admin/stats".into())?;
        Ok(DashboardStats {
            total_chatbots: state.chatbots.len() as u64,
            total_companies: state.companies.len() as u64,
            ..DashboardStats::default()
        })
    }

    async fn list_admins(&self) -> ClientResult<Vec<AdminAccount>> {
        Ok(self.begin("GET /admin/all".into())?.admins.clone())
    }

    async fn create_admin(&self, admin: &NewAdmin) -> ClientResult<()> {
        let mut state = self.begin("POST /admin/create".into())?;
        if state.admins.iter().any(|a| a.email == admin.email) {
            return Err(ClientError::from_response(409, r#"{"error":"Admin already exists"}"#));
        }
        let id = RecordId::from((state.admins.len() + 1).to_string());
        state.admins.push(AdminAccount {
            id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            created_at: None,
        });
        Ok(())
    }

    async fn list_companies(&self) -> ClientResult<Vec<Company>> {
        Ok(self.begin("GET /company/all".into())?.companies.clone())
    }

    async fn create_company(&self, company: &NewCompany) -> ClientResult<()> {
        let mut state = self.begin("POST /company/create".into())?;
        let id = RecordId::from((state.companies.len() + 1).to_string());
        state.companies.push(Company {
            id,
            name: company.name.clone(),
            url: company.url.clone(),
        });
        Ok(())
    }

    async fn list_chatbots(&self) -> ClientResult<Vec<Chatbot>> {
        Ok(self.begin("GET /chatbot/all".into())?.chatbots.clone())
    }

    async fn update_token_limit(&self, id: &RecordId, token_limit: u64) -> ClientResult<()> {
        let mut state = self.begin(format!("PUT /chatbot/update-token-limit/{} {}", id, token_limit))?;
        match state.chatbots.iter_mut().find(|c| &c.id == id) {
            Some(bot) => {
                bot.token_limit = Some(token_limit);
                Ok(())
            }
            None => Err(ClientError::from_response(404, r#"{"message":"Chatbot not found"}"#)),
        }
    }

    async fn messages(&self, id: &RecordId) -> ClientResult<Vec<Message>> {
        let state = self.begin(format!("GET /chatbot/messages/{}", id))?;
        Ok(state.messages.get(id).cloned().unwrap_or_default())
    }

    async fn download_report(&self, id: &RecordId) -> ClientResult<Vec<u8>> {
        drop(self.begin(format!("GET /report/download/{}", id))?);
        Ok(format!("%PDF-1.4 report {}", id).into_bytes())
    }

    async fn list_plans(&self) -> ClientResult<Vec<Plan>> {
        Ok(self.begin("GET /plans".into())?.plans.clone())
    }

    async fn subscription(&self, id: &RecordId) -> ClientResult<Option<Subscription>> {
        let state = self.begin(format!("GET /chatbot/{}/subscription", id))?;
        if state.failing_subscriptions.contains(id) {
            return Err(ClientError::new(ErrorKind::Server, "subscription lookup failed"));
        }
        Ok(state.subscriptions.get(id).cloned())
    }

    async fn renew_subscription(&self, id: &RecordId, request: &RenewRequest) -> ClientResult<()> {
        let mut state = self.begin(format!("POST /chatbot/{}/renew {} {}", id, request.plan_id, request.months))?;
        let plan = state
            .plans
            .iter()
            .find(|p| p.id == request.plan_id)
            .cloned()
            .ok_or_else(|| ClientError::from_response(404, r#"{"message":"Plan not found"}"#))?;
        state.subscriptions.insert(
            id.clone(),
            Subscription {
                plan_id: plan.id,
                name: plan.name,
                duration_days: plan.duration_days,
                max_users: plan.max_users,
                price: plan.price,
                end_date: Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()),
            },
        );
        Ok(())
    }

    async fn client_config(&self, id: &RecordId) -> ClientResult<ClientConfig> {
        let state = self.begin(format!("GET /chatbot/{}/config", id))?;
        Ok(state.configs.get(id).cloned().unwrap_or_else(|| json!({})))
    }

    async fn update_client_config(&self, id: &RecordId, config: &ClientConfig) -> ClientResult<ClientConfig> {
        let mut state = self.begin(format!("PUT /chatbot/{}/config", id))?;
        state.configs.insert(id.clone(), config.clone());
        Ok(config.clone())
    }
}
