pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod guard;
pub mod search;
pub mod session;
pub mod types;
pub mod views;

pub use api::{AdminApi, ApiClient};
pub use context::AppContext;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use session::SessionStore;

#[cfg(test)]
pub mod testing;
