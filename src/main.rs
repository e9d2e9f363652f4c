use clap::Parser;

mod cli;
mod config;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let args = cli::Args::parse();
    cli::run(args).await
}
