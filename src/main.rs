//! Main application entry point.
//!
//! A thin wrapper around the `url_expander` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger and TLS initialization
//! - Picking the front end: Lambda when `AWS_LAMBDA_FUNCTION_NAME` is set,
//!   otherwise the local stdin loop

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use tokio::io::BufReader;

use url_expander::config::{Opt, ENV_LAMBDA_FUNCTION_NAME};
use url_expander::dispatch::{run_lambda, run_local};
use url_expander::initialization::{init_client, init_crypto_provider, init_logger_with};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env is the normal case
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();
    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = opt.into_config(|key| std::env::var(key).ok());

    init_crypto_provider();
    let mut handle = init_client(&config).context("Failed to initialize HTTP client")?;

    if let Ok(function_name) = std::env::var(ENV_LAMBDA_FUNCTION_NAME) {
        info!("Running as Lambda function {}", function_name);
        return run_lambda(handle, config)
            .await
            .map_err(|e| anyhow!("Lambda runtime failed: {}", e));
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run_local(&mut handle, &config, stdin)
        .await
        .context("Failed to read requests from stdin")?;

    // Release pooled connections before the runtime shuts down
    drop(handle);
    Ok(())
}
