#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub engine_url: String,
    pub port: u16,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:properties.db".to_string());

        // REST endpoint of the separately-running conversational engine
        let engine_url = std::env::var("ENGINE_URL")
            .unwrap_or_else(|_| "http://localhost:5005/webhooks/rest/webhook".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);

        let seed_demo_data = std::env::var("SEED_DEMO_DATA")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Config {
            database_url,
            engine_url,
            port,
            seed_demo_data,
        }
    }
}
