use crate::config::Config;
use crate::session::SessionState;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub session: Arc<Mutex<SessionState>>,
}

impl AppState {
    pub fn new(config: Config, http: Client, session: SessionState) -> Self {
        Self {
            config: Arc::new(config),
            http,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
