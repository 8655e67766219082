use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tebucks::domain::ports::{AccountApiBox, AuthApiBox, TransferApiBox};
use tebucks::infrastructure::http::HttpBackend;
use tebucks::infrastructure::in_memory::InMemoryBackend;
use tebucks::interfaces::console::app;
use tebucks::interfaces::console::prompt::Console;

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the TE Bucks API. Falls back to TEBUCKS_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Run against an in-process backend instead of a remote API.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tebucks::logging::init();
    let cli = Cli::parse();

    let (auth, accounts, transfers) = if cli.offline {
        let backend = InMemoryBackend::new();

        // Create boxed instances for each trait
        let auth: AuthApiBox = Box::new(backend.clone());
        let accounts: AccountApiBox = Box::new(backend.clone());
        let transfers: TransferApiBox = Box::new(backend);
        (auth, accounts, transfers)
    } else {
        let base_url = cli
            .api_url
            .or_else(|| std::env::var("TEBUCKS_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let backend = HttpBackend::new(base_url).into_diagnostic()?;

        let auth: AuthApiBox = Box::new(backend.clone());
        let accounts: AccountApiBox = Box::new(backend.clone());
        let transfers: TransferApiBox = Box::new(backend);
        (auth, accounts, transfers)
    };

    let mut console = Console::stdio();
    app::run(&mut console, auth, accounts, transfers)
        .await
        .into_diagnostic()?;

    Ok(())
}
