use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use churn_serve::config::{LoggingSettings, Settings, StartupError};
use churn_serve::routes::{self, handle_json_payload_error, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging; RUST_LOG takes precedence over the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn bootstrap(settings: &Settings) -> Result<AppState, StartupError> {
    let state = AppState::from_settings(settings)?;
    Ok(state)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = Settings::load();
    let logging = loaded
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting churn scoring service...");

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            let e = StartupError::from(e);
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!("Configuration loaded successfully");

    // Artifacts are loaded exactly once; a bad artifact stops the process
    let app_state = match bootstrap(&settings) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to load model artifacts: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    };

    info!(
        "Predictor ready with {} features (strict encoding: {})",
        app_state.predictor.dimension(),
        app_state.strict_encoding
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
