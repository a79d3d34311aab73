pub mod auth_handler;
pub mod health;
pub mod message_handler;
pub mod posts_handler;
pub mod user_handler;

pub use health::{health_check, metrics_handler};
