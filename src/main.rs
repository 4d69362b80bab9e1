use std::process;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use verification_provider::{
    app, publisher_from_env,
    utils::{
        constant::DEFAULT_BIND_ADDR,
        secret::{env_or, require_secret},
    },
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verification_provider=info".into()),
        )
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(
            "verification-provider".into(),
            std::io::stdout,
        ))
        .init();

    let database_url = require_secret("DATABASE_URL").unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    let publisher = publisher_from_env().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .unwrap_or_else(|e| {
            error!(?e, "Failed to connect to database");
            process::exit(1);
        });

    if let Err(e) = sqlx::migrate!().run(&db_pool).await {
        error!(?e, "Failed to run database migrations");
        process::exit(1);
    }

    let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR);
    let listener = TcpListener::bind(&bind_addr).await.unwrap_or_else(|e| {
        error!(?e, %bind_addr, "Failed to bind listener");
        process::exit(1);
    });
    info!(%bind_addr, "Server starting");

    if let Err(e) = axum::serve(listener, app(db_pool, publisher).into_make_service()).await {
        error!(?e, "Server terminated");
        process::exit(1);
    }
}
