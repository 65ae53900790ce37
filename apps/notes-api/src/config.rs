use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_users::{PasswordConfig, PasswordHasher};

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    /// Built from `PASSWORD_WORK_FACTOR` / `PASSWORD_MEMORY_KIB`
    pub hasher: PasswordHasher,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let app = app_info!();
        let mongodb = MongoConfig::from_env()?.with_app_name(app.name);
        let server = ServerConfig::from_env()?;
        let hasher = PasswordHasher::new(PasswordConfig::from_env()?)?;

        Ok(Self {
            app,
            mongodb,
            server,
            hasher,
            environment,
        })
    }
}
