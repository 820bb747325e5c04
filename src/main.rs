mod app_state;
mod availability;
mod config;
mod gate;
mod models;
mod repository;
mod routes;
mod store;
pub use app_state::AppState;
pub use config::Config;

use crate::routes::make_app;
use dotenv::dotenv;
use std::error::Error;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if dotenv().is_err() {
        println!("Starting server without .env file.");
    }
    let app = make_app()?;
    let listener = TcpListener::bind("0.0.0.0:5000").await?;
    println!("🚀 Server started successfully");
    axum::serve(listener, app).await?;
    Ok(())
}
