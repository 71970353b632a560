use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::io;

use todolist_api::config::Config;
use todolist_api::{repository, routes, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let pool = repository::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| {
            log::error!("failed to initialise database: {}", e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;

    let state = AppState::postgres(pool, config.auth.clone());

    log::info!("starting server at {}", config.server_url());
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
            .configure(|cfg| routes::config(cfg, &state))
    })
    .shutdown_timeout(10)
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
