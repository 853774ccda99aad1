use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use audioalign::{cli, config, error, server, types::AuthState};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Build and display your musical-taste profile
    Profile(ProfileOptions),

    /// Run the HTTP API server for the web frontend
    Serve,

    /// Remove the cached profile
    Reset,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileOptions {
    /// Recompute even if a cached profile is still fresh
    #[clap(long)]
    pub force: bool,

    /// Seed recommendations by averaged feature targets instead of track ids
    #[clap(long)]
    pub targets: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<AuthState>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&config), Arc::clone(&oauth_result)).await;
        }

        Command::Profile(opt) => cli::profile(&config, opt.force, opt.targets).await,

        Command::Serve => {
            let auth_state: Arc<Mutex<Option<AuthState>>> = Arc::new(Mutex::new(None));
            server::start_api_server(config, auth_state).await;
        }

        Command::Reset => cli::reset().await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
