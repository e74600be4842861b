use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_items::ItemRules;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub items: ItemRules,
}

impl Config {
    /// `ITEMS_ALLOW_ZERO_PRICE` (default: false) toggles acceptance of `price: 0`
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let items = ItemRules {
            allow_zero_price: env_parse_or_default("ITEMS_ALLOW_ZERO_PRICE", false)?,
        };

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            items,
        })
    }
}
