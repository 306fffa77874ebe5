/*
 * Responsibility
 * - tokio runtime boot
 * - app::run() only, no logic here
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod error;
mod middleware;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
