use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use roomsync_algo::config::{LoggingSettings, Settings};
use roomsync_algo::routes::{self, AppState};
use roomsync_algo::services::Roster;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging);

    info!("Starting RoomSync matching service...");

    let roster = Arc::new(Roster::new());

    if let Some(path) = &settings.roster.seed_file {
        match roster.seed_from_file(path).await {
            Ok(count) => info!("Seeded roster with {} participants from {}", count, path),
            Err(e) => {
                error!("Failed to seed roster from {}: {}", path, e);
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
            }
        }
    }

    let app_state = AppState::new(roster, settings.matching.clone());

    info!(
        "Matcher initialized (default limit: {}, max limit: {})",
        settings.matching.default_limit, settings.matching.max_limit
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
