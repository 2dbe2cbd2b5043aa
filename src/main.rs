//! authent - Entry Point
//!
//! Interactive register/login menu over an in-memory credential store.

use log::info;
use std::sync::Arc;
use tokio::io::BufReader;

use authent::cli::Session;
use authent::error::{AppError, handlers::handle_error};
use authent::{AuthConfig, AuthService};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = AuthConfig::load()?;
    info!(
        "Starting authent (hash cost {}, timing equalization {})",
        config.hash_cost, config.equalize_login_timing
    );

    let service = Arc::new(AuthService::from_config(&config)?);

    let mut session = Session::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        Arc::clone(&service),
        config.max_input_length,
    );
    session.run().await?;

    info!("Shutting down with {} registered users", service.store().len());
    Ok(())
}
