use actix_web::{middleware::Logger, web, App, HttpServer};
use around_service::config::{Config, StoreBackend};
use around_service::handlers;
use around_service::services::{
    ElasticsearchPostStore, InMemoryPostStore, PostService, PostStore, UuidGenerator,
};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn build_store(config: &Config) -> io::Result<Arc<dyn PostStore>> {
    match config.store.backend {
        StoreBackend::Elasticsearch => {
            tracing::info!(
                url = %config.store.url,
                index = %config.store.post_index,
                "Connecting to Elasticsearch..."
            );
            let store = ElasticsearchPostStore::connect(&config.store)
                .await
                .map_err(|e| {
                    tracing::error!("Elasticsearch initialization failed: {}", e);
                    io::Error::new(
                        io::ErrorKind::ConnectionRefused,
                        format!("Elasticsearch initialization failed: {e}"),
                    )
                })?;
            tracing::info!(index = %store.post_index(), "Elasticsearch connection established");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory post store; posts are lost on restart");
            Ok(Arc::new(InMemoryPostStore::new()))
        }
    }
}

/// Around Service
///
/// Accepts geo-tagged posts and answers proximity searches over them.
///
/// # Routes
///
/// - `POST /post` - store a post, returns its id
/// - `GET /search?lat=&lon=&range=` - posts within `range` km (default 200)
/// - `/health`, `/health/live`, `/health/ready` - probes
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Support container healthchecks via CLI subcommand: `healthcheck`
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" || cmd == "healthcheck-http" {
                let port = std::env::var("AROUND_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(8080);
                let url = format!("http://127.0.0.1:{}/health", port);
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"));
                    }
                }
            }
        }
    }

    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,around_service=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting around-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        default_radius_km = config.search.default_radius_km,
        store_timeout_ms = config.store.request_timeout_ms,
        "Search defaults loaded"
    );

    let store = build_store(&config).await?;
    let post_service = web::Data::new(PostService::new(
        store,
        Arc::new(UuidGenerator),
        config.search,
        config.store.request_timeout(),
    ));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(post_service.clone())
            .wrap(handlers::cors())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .shutdown_timeout(30)
    .run()
    .await
}
