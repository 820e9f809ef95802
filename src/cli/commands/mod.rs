pub mod admin;
pub mod auth;
pub mod chatbot;
pub mod company;
pub mod overview;
pub mod plan;
pub mod subscription;
