//! View controllers: each fetches what it shows and re-fetches after a mutation.

pub mod admins;
pub mod chatbots;
pub mod companies;
pub mod login;
pub mod overview;
pub mod subscriptions;

pub use admins::{AdminForm, AdminsView};
pub use chatbots::{ChatbotsView, RowState};
pub use companies::CompaniesView;
pub use login::{LoginFlow, LoginState};
pub use overview::OverviewView;
pub use subscriptions::PlansView;
