use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub app_env: String,
    pub allowed_origin: Option<String>,
    pub upload_dir: PathBuf,
    /// Abilita il token `dev-token` (solo in development)
    pub enable_dev_token: bool,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://invito.db".to_string());

        // Il secret è condiviso con il frontend (NextAuth)
        let jwt_secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("NEXTAUTH_SECRET"))
            .unwrap_or_else(|_| {
                warn!("JWT_SECRET not set, using default (not secure for production!)");
                DEFAULT_JWT_SECRET.to_string()
            });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let allowed_origin = env::var("ALLOWED_ORIGIN").ok().filter(|o| !o.is_empty());

        let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let enable_dev_token = env::var("ENABLE_DEV_TOKEN")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            app_env,
            allowed_origin,
            upload_dir,
            enable_dev_token,
        };

        if config.enable_dev_token && !config.is_development() {
            return Err("ENABLE_DEV_TOKEN is only allowed when APP_ENV=development".to_string());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Environment: {}", self.app_env);
        info!("Server Address: {}:{}", self.server_host, self.server_port);
        info!("Database: {}", Self::mask_url(&self.database_url));
        info!("Max DB Connections: {}", self.max_connections);
        info!("Upload directory: {}", self.upload_dir.display());
        info!(
            "Allowed origin: {}",
            self.allowed_origin.as_deref().unwrap_or("any")
        );
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("JWT Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("JWT Secret: custom secret configured");
        }
        if self.enable_dev_token {
            warn!("Development token bypass is ENABLED");
        }
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        match (url.find("://"), url.find('@')) {
            (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
                format!("{}://****{}", &url[..scheme_end], &url[at_pos..])
            }
            _ => url.to_string(),
        }
    }
}
