pub mod app;
pub mod calendar;
pub mod coach;
pub mod config;
pub mod dog;
pub mod errors;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod session;
pub mod share;
pub mod state;
pub mod stats;
pub mod ui;
pub mod weather;

pub use app::router;
pub use config::Config;
pub use fetch::build_client;
pub use session::SessionState;
pub use state::AppState;
