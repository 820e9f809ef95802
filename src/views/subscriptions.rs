use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult};
use crate::types::{Plan, RecordId, RenewRequest, Subscription};

#[derive(Debug, Default)]
pub struct PlansView {
    plans: Vec<Plan>,
}

impl PlansView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<A: AdminApi + ?Sized>(&mut self, api: &A) -> ClientResult<&[Plan]> {
        self.plans = api.list_plans().await?;
        Ok(&self.plans)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }
}

pub async fn active_subscription<A: AdminApi + ?Sized>(
    api: &A,
    chatbot: &RecordId,
) -> ClientResult<Option<Subscription>> {
    api.subscription(chatbot).await
}

/// Renew (or replace) a chatbot's subscription, then read back the active one
pub async fn renew<A: AdminApi + ?Sized>(
    api: &A,
    chatbot: &RecordId,
    plan: &RecordId,
    months: u32,
) -> ClientResult<Option<Subscription>> {
    if months == 0 {
        return Err(ClientError::validation("Renewal must be for at least one month."));
    }

    let request = RenewRequest {
        plan_id: plan.clone(),
        months,
    };
    api.renew_subscription(chatbot, &request).await?;
    tracing::info!(chatbot = %chatbot, plan = %plan, months, "subscription renewed");
    api.subscription(chatbot).await
}
