use library_lending::{
    adapters::{
        memory::{MemoryBookStore, MemoryLoanStore},
        postgres::{PostgresBookStore, PostgresLoanStore},
    },
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::{AppConfig, StoreBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_lending=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let service_deps = match config.store.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory stores");
            ServiceDependencies {
                book_store: Arc::new(MemoryBookStore::new()),
                loan_store: Arc::new(MemoryLoanStore::new()),
            }
        }
        StoreBackend::Postgres => {
            tracing::info!(
                max_connections = config.database.max_connections,
                "Connecting to database"
            );

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            ServiceDependencies {
                book_store: Arc::new(PostgresBookStore::new(pool.clone())),
                loan_store: Arc::new(PostgresLoanStore::new(pool)),
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
