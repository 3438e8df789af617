use dotenv::dotenv;
use tracing::{error, info, warn};

use matrimony_admin::app::app::App;
use matrimony_admin::config::app_conf::AppConfig;
use matrimony_admin::util::logger::Logger;

#[tokio::main]
async fn main() {
    // .env has to be loaded before the logger reads LOG_DIR and the level variables
    let env_loaded = dotenv();

    let app_config = AppConfig::from_env();
    let _logger = match Logger::new(&app_config.log_dir) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting matrimony admin backend");
    match env_loaded {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server stopped with error: {}", e);
        std::process::exit(1);
    }
}
