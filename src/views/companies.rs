use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult};
use crate::search::filter_by_name;
use crate::types::{Company, NewCompany};

#[derive(Debug, Default)]
pub struct CompaniesView {
    companies: Vec<Company>,
}

impl CompaniesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<A: AdminApi + ?Sized>(&mut self, api: &A) -> ClientResult<&[Company]> {
        self.companies = api.list_companies().await?;
        Ok(&self.companies)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn search(&self, query: &str) -> Vec<&Company> {
        filter_by_name(&self.companies, query)
    }

    /// Create a company, then reload the list from the server
    pub async fn create<A: AdminApi + ?Sized>(&mut self, api: &A, name: &str, url: &str) -> ClientResult<()> {
        let company = NewCompany {
            name: name.trim().to_string(),
            url: url.trim().to_string(),
        };
        if company.name.is_empty() || company.url.is_empty() {
            return Err(ClientError::validation("Company name and domain are required."));
        }

        api.create_company(&company).await?;
        tracing::info!(name = %company.name, "company created");
        self.refresh(api).await?;
        Ok(())
    }
}
