use docket::cli;
use docket::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::Cli::run().await
}
