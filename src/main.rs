use std::env::set_var;

use sphynx::cli;
use sphynx::cli::error::CliResult;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        set_var("RUST_LOG", "none,sphynx=trace");
    }

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    cli::run().await
}
