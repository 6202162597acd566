use crate::auth::JwtAuthenticator;
use crate::config::RecipeServerConfig;
use crate::database::RecipeRepository;
use crate::database::sqlite::{SqliteRepository, connect};
use anyhow::Context;
use axum::{Router, routing::get};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod auth;
pub mod config;
mod database;
mod domain;
mod error;
mod features;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "recipe-server", version, about = "Recipe records over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a bearer token for a user, signed with JWT_SECRET
    IssueToken {
        user_id: i64,
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
}

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn RecipeRepository>,
    pub auth: Arc<JwtAuthenticator>,
}

pub fn app(state: AppState) -> Router {
    // api router, where features are composed
    let api_router = Router::new().nest("/recipes", features::recipes::recipes_router());

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(features::health::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RecipeServerConfig::from_env()?;
    let authenticator = JwtAuthenticator::new(&config.jwt_secret);

    match cli.command.unwrap_or(Command::Serve) {
        Command::IssueToken { user_id, hours } => {
            let token = authenticator.issue_token(user_id, chrono::Duration::hours(hours))?;
            println!("{}", token);
            Ok(())
        }
        Command::Serve => serve(config, authenticator).await,
    }
}

async fn serve(config: RecipeServerConfig, authenticator: JwtAuthenticator) -> anyhow::Result<()> {
    // the database file is created on first connect
    let pool = connect(&config.database_url, config.max_connections).await?;
    tracing::info!(
        "Connected to {} ({} connections max)",
        config.database_url,
        config.max_connections
    );

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState {
        repo: Arc::new(SqliteRepository::new(pool)),
        auth: Arc::new(authenticator),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    tracing::info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
