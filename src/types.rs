//! Entities exchanged with the admin REST API

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned identifier. The API sends either strings or numbers;
/// the client only ever echoes them back into paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => RecordId(s),
            RawId::Number(n) => RecordId(n.to_string()),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chatbot {
    pub id: RecordId,
    pub name: String,
    #[serde(default, alias = "companyName")]
    pub company_name: Option<String>,
    #[serde(default, alias = "companyUrl")]
    pub company_url: Option<String>,
    #[serde(default, alias = "tokenLimit")]
    pub token_limit: Option<u64>,
    #[serde(default, alias = "usedTokens")]
    pub used_tokens: Option<u64>,
    #[serde(default, alias = "totalMessages")]
    pub total_messages: Option<u64>,
    #[serde(default, alias = "uniqueUsers")]
    pub unique_users: Option<u64>,
}

/// Derived display value for a token quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAllowance {
    Limited(u64),
    Unlimited,
}

impl fmt::Display for TokenAllowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenAllowance::Limited(n) => write!(f, "{}", n),
            TokenAllowance::Unlimited => f.write_str("Unlimited"),
        }
    }
}

impl Chatbot {
    /// `max(limit - used, 0)`; unlimited when either side is unknown
    pub fn remaining_tokens(&self) -> TokenAllowance {
        match (self.token_limit, self.used_tokens) {
            (Some(limit), Some(used)) => TokenAllowance::Limited(limit.saturating_sub(used)),
            _ => TokenAllowance::Unlimited,
        }
    }

    /// A missing or zero limit is shown as unlimited
    pub fn limit_display(&self) -> TokenAllowance {
        match self.token_limit {
            Some(limit) if limit > 0 => TokenAllowance::Limited(limit),
            _ => TokenAllowance::Unlimited,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLimitUpdate {
    pub token_limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str("user"),
            Sender::Bot => f.write_str("bot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(alias = "plan_id", alias = "planId")]
    pub id: RecordId,
    pub name: String,
    #[serde(default, alias = "durationDays")]
    pub duration_days: Option<u32>,
    #[serde(default, alias = "maxUsers")]
    pub max_users: Option<u64>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(alias = "planId")]
    pub plan_id: RecordId,
    #[serde(alias = "plan_name", alias = "planName")]
    pub name: String,
    #[serde(default, alias = "durationDays")]
    pub duration_days: Option<u32>,
    #[serde(default, alias = "maxUsers")]
    pub max_users: Option<u64>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewRequest {
    pub plan_id: RecordId,
    pub months: u32,
}

/// Aggregate counters from `/admin/stats`, field names as the server sends them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "totalChatbots", default)]
    pub total_chatbots: u64,
    #[serde(rename = "totalCompanies", default)]
    pub total_companies: u64,
    #[serde(rename = "unique_users", alias = "uniqueUsers", default)]
    pub unique_users: u64,
    #[serde(rename = "totalMessages", default)]
    pub total_messages: u64,
    #[serde(rename = "monthlyTokenUsage", default)]
    pub monthly_token_usage: u64,
}

impl DashboardStats {
    /// Labelled counters in display order
    pub fn tiles(&self) -> [(&'static str, u64); 5] {
        [
            ("Total Chatbots", self.total_chatbots),
            ("Total Companies", self.total_companies),
            ("Unique Users", self.unique_users),
            ("Total Messages", self.total_messages),
            ("Monthly Tokens", self.monthly_token_usage),
        ]
    }
}

/// Chatbot widget configuration, passed through untouched
pub type ClientConfig = Value;
