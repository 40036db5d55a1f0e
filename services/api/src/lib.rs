mod cli;
mod infra;
mod report;
mod routes;
mod server;

use org_realign::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
