// Service modules (HTTP server, sessions, uploads)
pub mod http_server;
pub mod process;
pub mod service_config;
pub mod service_state;
pub mod sessions;
pub mod uploads;

// App state (configuration, paths)
pub mod state;

// Re-exports for consumers (the CLI, integration tests)
pub use process::spawn_service;
pub use service_config::Config as ServiceConfig;
pub use service_state::State as ServiceState;
pub use state::{AppConfig, AppState, StateError};
