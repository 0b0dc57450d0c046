use dotenvy::dotenv;
use std::process::ExitCode;

use events_server::config::Config;
use events_server::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    let result = match Config::from_env() {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}
