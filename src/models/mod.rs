pub mod app_config;
pub mod oauth;

pub use app_config::{AppConfig, AppState};
pub use oauth::{CallbackParams, UserInfo};
