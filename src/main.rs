use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use zoomdial::{
    config, error, info,
    server::{self, AppState},
    utils, warning,
    zoom::ZoomClient,
};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web server
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind (defaults to SERVER_HOST or 0.0.0.0)
    #[clap(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to PORT or 5000)
    #[clap(long)]
    pub port: Option<u16>,

    /// Open the authorization page in the default browser once listening
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    let host = opt.host.unwrap_or_else(config::server_host);
    let port = match opt.port {
        Some(port) => port,
        None => match config::server_port() {
            Ok(port) => port,
            Err(e) => error!("{}", e),
        },
    };

    let settings = match config::Settings::from_env(port) {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    info!(
        "Client {} in {} mode, redirect URI {}",
        utils::mask(&settings.client_id),
        settings.call_mode,
        settings.redirect_uri
    );

    let zoom = match ZoomClient::new(settings) {
        Ok(zoom) => zoom,
        Err(e) => error!("Cannot build HTTP client: {}", e),
    };

    if opt.open {
        let browse_host = if host == "0.0.0.0" { "localhost" } else { host.as_str() };
        let url = format!("http://{browse_host}:{port}/authorize");
        tokio::spawn(async move {
            // give the listener a moment to bind
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            if webbrowser::open(&url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    url
                )
            }
        });
    }

    info!("Listening on {}:{}", host, port);
    if let Err(e) = server::start_api_server(AppState::new(zoom), &host, port).await {
        error!("Server stopped: {}", e);
    }
}
