use std::error::Error;
use std::path::PathBuf;

use url::Url;

use slides_daemon::http_server::api::client::{ApiClient, ApiError};
use slides_daemon::state::AppState;

/// Resolve the remote URL for the API client.
///
/// Priority: explicit `--remote` flag > config file `app_port` > hardcoded 8080.
pub fn resolve_remote(explicit: Option<Url>, config_path: Option<PathBuf>) -> Url {
    if let Some(url) = explicit {
        return url;
    }
    if let Ok(state) = AppState::load(config_path) {
        if let Ok(url) = Url::parse(&format!("http://localhost:{}", state.config.app_port)) {
            return url;
        }
    }
    Url::parse("http://localhost:8080").expect("hardcoded URL must parse")
}

#[derive(Clone)]
pub struct OpContext {
    /// API client, carrying the saved login token when there is one
    pub client: ApiClient,
    /// Optional custom config path (defaults to ~/.slides)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    /// Create context with custom remote URL and optional config path
    pub fn new(remote: Url, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let token = AppState::load(config_path.clone())
            .ok()
            .and_then(|state| state.load_session_token());

        Ok(Self {
            client: ApiClient::new(&remote)?.with_token(token),
            config_path,
        })
    }

    /// The API client, failing early when no login token is saved.
    pub fn authed_client(&self) -> Result<&ApiClient, ApiError> {
        match self.client.token() {
            Some(_) => Ok(&self.client),
            None => Err(ApiError::NotLoggedIn),
        }
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_remote_explicit_wins() {
        let explicit = Url::parse("http://example.com:9999").unwrap();
        let result = resolve_remote(Some(explicit.clone()), None);
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_resolve_remote_falls_back_to_default() {
        // No explicit URL, no valid config path → hardcoded 8080
        let result = resolve_remote(None, Some(PathBuf::from("/nonexistent")));
        assert_eq!(result.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_resolve_remote_reads_config_port() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = slides_daemon::AppConfig {
            app_port: 9321,
            ..Default::default()
        };
        AppState::init(Some(temp.path().to_path_buf()), Some(config)).unwrap();

        let result = resolve_remote(None, Some(temp.path().to_path_buf()));
        assert_eq!(result.port(), Some(9321));
    }

    #[test]
    fn test_context_without_saved_token_is_not_logged_in() {
        let temp = tempfile::TempDir::new().unwrap();
        let remote = Url::parse("http://localhost:8080").unwrap();
        let ctx = OpContext::new(remote, Some(temp.path().to_path_buf())).unwrap();
        assert!(matches!(ctx.authed_client(), Err(ApiError::NotLoggedIn)));
    }
}
