//! Service entry point: load config, wire adapters, serve HTTP.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use estate_funnel::adapters::http::{app, AppState};
use estate_funnel::adapters::hubspot::{DisabledCrm, HubSpotConnector};
use estate_funnel::adapters::postgres::{
    PostgresLeadStore, PostgresOrderStore, PostgresSubscriptionStore,
};
use estate_funnel::adapters::stripe::{StripeClient, StripeConfig};
use estate_funnel::application::{spawn_event_worker, ProcessEventHandler};
use estate_funnel::config::AppConfig;
use estate_funnel::domain::product::ProductCatalog;
use estate_funnel::domain::webhook::WebhookVerifier;
use estate_funnel::ports::CrmConnector;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        crm_enabled = config.crm.is_enabled(),
        "Configuration loaded"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Database connection established");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let payment = Arc::new(StripeClient::new(StripeConfig::from_payment_config(
        &config.payment,
    )));
    let orders = Arc::new(PostgresOrderStore::new(pool.clone()));
    let subscriptions = Arc::new(PostgresSubscriptionStore::new(pool.clone()));
    let leads = Arc::new(PostgresLeadStore::new(pool.clone()));

    let crm: Arc<dyn CrmConnector> = match &config.crm.hubspot_api_key {
        Some(key) => Arc::new(HubSpotConnector::new(
            key.clone(),
            config.crm.api_base_url.clone(),
        )),
        None => Arc::new(DisabledCrm),
    };

    let verifier = Arc::new(
        WebhookVerifier::new(config.payment.stripe_webhook_secret.clone())
            .with_require_livemode(config.payment.require_livemode),
    );

    let dispatcher = ProcessEventHandler::new(orders, subscriptions, payment.clone());
    let (events, _worker) = spawn_event_worker(dispatcher, config.server.event_queue_capacity);

    let state = AppState {
        catalog: Arc::new(ProductCatalog::default()),
        payment,
        leads,
        crm,
        verifier,
        events,
    };

    let router = app(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Shutdown signal received");
}
