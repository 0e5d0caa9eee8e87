use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use log::{info, warn};

use projecttasks::config::Config;
use projecttasks::routes;
use projecttasks::state::AppState;
use projecttasks::store::{MemoryStore, PgStore};

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(startup_error)?;
    info!("Loaded configuration: {:?}", config);

    let state = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.database_max_connections)
                .await
                .map_err(startup_error)?;
            store.migrate().await.map_err(startup_error)?;
            info!("Connected to PostgreSQL and applied migrations");
            AppState::new(Arc::new(store), &config)
        }
        None => {
            warn!("DATABASE_URL is not set; data is kept in memory and lost on shutdown");
            AppState::new(Arc::new(MemoryStore::new()), &config)
        }
    }
    .map_err(startup_error)?;

    info!("Starting server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure_app(state.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
