use clap::Parser;
use tracing_subscriber::EnvFilter;

use oss_upload::cli::{run, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Success lines are the program's stdout contract; diagnostics go to
    // stderr so the two streams stay separable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("[ERROR] Upload failed: {e:#}");
            std::process::exit(1);
        }
    }
}
