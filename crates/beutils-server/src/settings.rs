//! Settings management for the beutils server
//!
//! Settings load from `BEUTILS_`-prefixed environment variables layered over
//! an optional `conf/beutils.yml` file, with a few command line overrides.

use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use beutils_tasks::TaskFlags;

// Deployment environments
pub const LOCAL: &str = "local";
pub const STAGING: &str = "staging";
pub const PRODUCTION: &str = "production";
pub const TEMPORARY: &str = "temporary";

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'e', long = "environment")]
    environment: Option<String>,
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application settings loaded from the environment and config file
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub config: Config,
}

impl Settings {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(Environment::with_prefix("beutils").try_parsing(true))
            .add_source(config::File::with_name("conf/beutils").required(false));

        if let Some(v) = args.environment {
            config_builder = config_builder
                .set_override("environment", v)
                .expect("Failed to set environment override");
        }
        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override("server_port", i64::from(v))
                .expect("Failed to set port override");
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder
                .set_override("db_url", v)
                .expect("Failed to set database URL override");
        }

        let config = config_builder
            .build()
            .expect("Failed to build settings - check conf/beutils.yml");

        Settings { config }
    }

    /// Settings over an already-built config, for tests
    pub fn from_config(config: Config) -> Self {
        Settings { config }
    }

    // ========================================================================
    // Project environment
    // ========================================================================

    pub fn project_name(&self) -> String {
        self.config
            .get_string("project_name")
            .unwrap_or("beutils".to_string())
    }

    pub fn environment(&self) -> String {
        self.config
            .get_string("environment")
            .unwrap_or(TEMPORARY.to_string())
    }

    pub fn is_local(&self) -> bool {
        self.environment() == LOCAL
    }

    pub fn debug(&self) -> bool {
        self.config.get_bool("debug").unwrap_or(false)
    }

    // ========================================================================
    // Server
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server_address")
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config.get_int("server_port").unwrap_or(8000) as u16
    }

    pub fn log_dir(&self) -> Option<String> {
        self.config
            .get_string("log_dir")
            .ok()
            .filter(|dir| !dir.is_empty())
    }

    // ========================================================================
    // Database
    // ========================================================================

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let url = self
            .config
            .get_string("db_url")
            .map_err(|_| anyhow::anyhow!("BEUTILS_DB_URL is required"))?;

        let mut options = ConnectOptions::new(url);
        options
            .max_connections(self.config.get_int("db_max_connections").unwrap_or(20) as u32)
            .sqlx_logging(self.debug());

        Ok(Database::connect(options).await?)
    }

    // ========================================================================
    // Storage
    // ========================================================================

    /// Local storage is only honored in the local environment; deployed
    /// environments always use S3.
    pub fn use_local_storage(&self) -> bool {
        self.is_local() && self.config.get_bool("use_local_storage").unwrap_or(true)
    }

    pub fn static_root(&self) -> String {
        self.config
            .get_string("static_root")
            .unwrap_or("staticfiles".to_string())
    }

    pub fn media_root(&self) -> String {
        self.config
            .get_string("media_root")
            .unwrap_or("media".to_string())
    }

    pub fn static_url(&self) -> String {
        self.config
            .get_string("static_url")
            .unwrap_or("/static/".to_string())
    }

    pub fn media_url(&self) -> String {
        self.config
            .get_string("media_url")
            .unwrap_or("/media/".to_string())
    }

    pub fn aws_static_bucket_name(&self) -> String {
        self.config
            .get_string("aws_static_bucket_name")
            .unwrap_or_default()
    }

    pub fn aws_storage_bucket_name(&self) -> String {
        self.config
            .get_string("aws_storage_bucket_name")
            .unwrap_or_default()
    }

    pub fn aws_s3_static_domain(&self) -> String {
        self.config
            .get_string("aws_s3_static_domain")
            .unwrap_or_else(|_| format!("{}.s3.amazonaws.com", self.aws_static_bucket_name()))
    }

    pub fn aws_s3_storage_domain(&self) -> String {
        self.config
            .get_string("aws_s3_storage_domain")
            .unwrap_or_else(|_| format!("{}.s3.amazonaws.com", self.aws_storage_bucket_name()))
    }

    // ========================================================================
    // Background tasks
    // ========================================================================

    pub fn task_flags(&self) -> TaskFlags {
        TaskFlags {
            logged: self.config.get_bool("enable_task_logging").unwrap_or(false),
            on_commit: self
                .config
                .get_bool("enable_task_on_commit")
                .unwrap_or(false),
        }
    }

    // ========================================================================
    // Telegram
    // ========================================================================

    pub fn telegram_bot_token(&self) -> Option<String> {
        self.config
            .get_string("telegram_bot_token")
            .ok()
            .filter(|token| !token.is_empty())
    }

    pub fn telegram_queued_updates(&self) -> bool {
        self.config
            .get_bool("telegram_queued_updates")
            .unwrap_or(false)
    }
}
