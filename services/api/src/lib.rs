mod infra;
mod routes;
mod server;

use gramjal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    server::run().await
}
