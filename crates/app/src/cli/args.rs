pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "slides")]
#[command(about = "Catalogue, preview and discuss slide decks", version)]
pub struct Args {
    /// Daemon URL (defaults to http://localhost:<app_port> from the config)
    #[arg(long, global = true, env = "SLIDES_REMOTE")]
    pub remote: Option<Url>,

    /// Path to the slides config directory (defaults to ~/.slides)
    #[arg(long, global = true, env = "SLIDES_DIR")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
