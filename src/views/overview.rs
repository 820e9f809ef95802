use crate::api::AdminApi;
use crate::error::ClientResult;
use crate::types::DashboardStats;

#[derive(Debug, Default)]
pub struct OverviewView {
    stats: Option<DashboardStats>,
}

impl OverviewView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<A: AdminApi + ?Sized>(&mut self, api: &A) -> ClientResult<&DashboardStats> {
        let stats = api.stats().await?;
        Ok(self.stats.insert(stats))
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }
}
