use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult};
use crate::types::{AdminAccount, NewAdmin};

/// Fields of the add-admin form
#[derive(Debug, Clone, Default)]
pub struct AdminForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AdminForm {
    pub fn validate(&self) -> ClientResult<NewAdmin> {
        let fields = [&self.name, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::validation("All fields are required."));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::validation("Passwords do not match."));
        }

        Ok(NewAdmin {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct AdminsView {
    admins: Vec<AdminAccount>,
}

impl AdminsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<A: AdminApi + ?Sized>(&mut self, api: &A) -> ClientResult<&[AdminAccount]> {
        self.admins = api.list_admins().await?;
        Ok(&self.admins)
    }

    pub fn admins(&self) -> &[AdminAccount] {
        &self.admins
    }

    pub async fn create<A: AdminApi + ?Sized>(&mut self, api: &A, form: &AdminForm) -> ClientResult<()> {
        let admin = form.validate()?;
        api.create_admin(&admin).await?;
        tracing::info!(email = %admin.email, "admin created");
        self.refresh(api).await?;
        Ok(())
    }
}
