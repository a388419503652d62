mod cli;
mod infra;
mod render;
mod replay;
mod session;

use eligibility_wizard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
