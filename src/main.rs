use anyhow::Context;
use azure_devops_server_mcp::azure::client::AzureDevOpsClient;
use azure_devops_server_mcp::azure::connection;
use azure_devops_server_mcp::config::{FileConfig, Overrides, Settings};
use azure_devops_server_mcp::mcp::dispatcher::Dispatcher;
use azure_devops_server_mcp::mcp::server::AzureMcpServer;
use azure_devops_server_mcp::server::http;
use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Azure DevOps Server collection URL, e.g. https://ado.example.com/tfs/DefaultCollection
    #[arg(long, env = "ADO_SERVER_URL")]
    server_url: Option<String>,

    /// Personal access token
    #[arg(long, env = "ADO_PAT_TOKEN", hide_env_values = true)]
    pat: Option<String>,

    /// REST api-version sent with every request
    #[arg(long, env = "ADO_API_VERSION")]
    api_version: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default log level, RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Run in server mode
    #[arg(long)]
    server: bool,

    /// Port to run the server on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => match FileConfig::default_path() {
            Some(path) => FileConfig::load_from(&path)?,
            None => FileConfig::default(),
        },
    };

    let overrides = Overrides {
        server_url: args.server_url.clone(),
        pat: args.pat.clone(),
        api_version: args.api_version.clone(),
    };

    Ok(Settings::resolve(overrides, file)?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        _ = terminate => log::info!("Received terminate signal, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let settings = load_settings(&args).context("Failed to load configuration")?;
    log::debug!("Resolved settings: {:?}", settings);

    let client = AzureDevOpsClient::new(&settings.server_url, &settings.pat, &settings.api_version);
    let provider = connection::connect(client).await?;

    let dispatcher =
        Dispatcher::with_default_domains(provider).context("Failed to register tools")?;
    let mcp_server = AzureMcpServer::new(dispatcher);

    if args.server {
        log::info!("Starting web server on {}:{}", args.host, args.port);
        http::run_server(mcp_server, &args.host, args.port, shutdown_signal())
            .await
            .context("HTTP server failed")?;
    } else {
        log::info!("Starting stdio server");
        let service = mcp_server
            .serve(stdio())
            .await
            .context("Failed to start stdio transport")?;

        let cancellation = service.cancellation_token();
        tokio::spawn(async move {
            shutdown_signal().await;
            cancellation.cancel();
        });

        let reason = service.waiting().await?;
        log::info!("Stdio server stopped: {:?}", reason);
    }

    Ok(())
}
