use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use crypto_buddy::config::Config;
use crypto_buddy::routes;
use crypto_buddy::services::chatbot::ChatEngine;
use crypto_buddy::state::AppState;
use crypto_buddy::telegram::{BotApi, poller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crypto_buddy=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let engine = ChatEngine::new(&config);
    let bot = BotApi::new(&config.telegram_token);

    let state = Arc::new(AppState::new(engine.clone()));

    let cors = CorsLayer::very_permissive();
    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!("chat api listening on {}", config.bind_addr);

    tokio::spawn(poller::run(bot, engine));

    axum::serve(listener, app).await.context("chat api server")?;

    Ok(())
}
