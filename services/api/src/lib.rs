mod batch;
mod cli;
mod infra;
mod routes;
mod server;

use grant_eligibility::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
