use actix_web::{middleware::Logger, App, HttpServer};
use std::io;
use std::sync::Arc;

use routine::config::Config;
use routine::repository::{MemoryStore, PgStore};
use routine::{routes, security, Services};

fn to_io_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(to_io_error)?;

    let services = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.database_max_connections)
                .await
                .map_err(to_io_error)?;
            store.migrate().await.map_err(to_io_error)?;
            log::info!("Connected to Postgres, migrations applied");
            Services::from_store(Arc::new(store), config.bcrypt_cost)
        }
        None => {
            log::warn!("DATABASE_URL not set; using the in-memory store, data is lost on exit");
            Services::from_store(Arc::new(MemoryStore::new()), config.bcrypt_cost)
        }
    };

    log::info!("Starting routine server at {}", config.server_url());
    let allowed_origin = config.cors_allowed_origin.clone();
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(security::cors(&allowed_origin))
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
