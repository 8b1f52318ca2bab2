//! CSR CLI - Command line tool for weekly crop stress risk.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "csr-cli",
    version,
    about = "Crop stress risk toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: csr_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting csr-cli");
    csr_cmd::run(cli.command).await
}
