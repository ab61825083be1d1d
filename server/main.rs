use std::env;

use actix_files::Files;
use actix_web::{middleware, App, HttpServer};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_DIR: &str = "./dist";

/// Serves the generated map page and its wasm bundle
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = match env::var("PORT") {
        Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid PORT '{raw}', using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };
    let site_dir = env::var("SITE_DIR").unwrap_or_else(|_| DEFAULT_SITE_DIR.to_string());

    log::info!("Serving {site_dir} on 0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/", &site_dir).index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
