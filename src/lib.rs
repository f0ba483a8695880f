pub mod config;
pub mod export;
pub mod generate;
pub mod rest;

use std::sync::Arc;

use config::AppConfig;
use generate::client::Generator;

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub generator: Generator,
    pub started_at: std::time::Instant,
}
