mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod models;
mod routes;
mod service;

use std::str::FromStr;
use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use config::Config;
use db::DBClient;
use dotenv::dotenv;
use routes::create_router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: DBClient,
    pub http_client: reqwest::Client,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let connect_options = match SqliteConnectOptions::from_str(&config.database_url) {
        Ok(options) => options.create_if_missing(true),
        Err(err) => {
            println!("🔥 Invalid DATABASE_URL: {:?}", err);
            std::process::exit(1);
        }
    };

    let pool = match SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(connect_options)
        .await
    {
        Ok(pool) => {
            println!("✅Connection to the property database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the property database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = db::seed::ensure_schema(&pool).await {
        println!("🔥 Failed to prepare the properties table: {:?}", err);
        std::process::exit(1);
    }

    let db_client = DBClient::new(pool);

    if config.seed_demo_data {
        db::seed::seed_demo_data(&db_client).await;
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    let app_state = AppState {
        env: config.clone(),
        db_client,
        http_client: reqwest::Client::new(),
    };

    let app = create_router(Arc::new(app_state)).layer(cors);

    println!(
        "{}",
        format!("🚀 Server is running on http://localhost:{}", config.port)
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
