include!("../../lib.rs");
use lambda_http::{run, Body, Error};
use crate::catalog::controller::build_router;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        Configuration::from_env("dev")?
    } else {
        Configuration::from_env("prod")?
    };
    tracing::info!(branch = config.branch_id.as_str(), strategy = %config.cover_strategy,
        timeout_ms = ?config.cover_timeout_ms, "starting books api");

    let state = AppState::new(config)?;
    run(build_router::<Body>(state)).await
}
