use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use support_desk::config::ServerConfig;
use support_desk::db::establish_connection_pool;
use support_desk::repository::DieselRepository;
use support_desk::routes;
use support_desk::services::communications::RecordingStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool).with_page_size(config.page_size);

    log::info!(
        "Serving on {}:{} with {} rows per page",
        config.address,
        config.port,
        repo.page_size()
    );

    let assets_dir = config.assets_dir.clone();
    let recordings = web::Data::new(RecordingStore::new(&config.recordings_dir));

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(recordings.clone())
            .app_data(routes::json_config())
            .service(web::scope("/api/v1").configure(routes::configure))
            .service(Files::new("/", &assets_dir).index_file("index.html"))
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
