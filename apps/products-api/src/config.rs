//! Configuration for Products API

use axum_helpers::CorsOrigins;
use core_config::{
    app_info, env_flag, env_or_default, env_parse, server::ServerConfig, AppInfo, FromEnv,
};
use database::sql::SqlConfig;
use domain_products::query::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Which product store backs the API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    /// sea-orm table with integer ids
    #[default]
    Sql,
    /// process memory with UUID ids, lost on restart
    Memory,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreKind,
    pub database: SqlConfig,
    /// Page size when a listing does not ask for one, within [1, 100]
    pub per_page: u64,
    pub cors_origins: CorsOrigins,
    /// Insert the sample catalog into an empty store at startup
    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = SqlConfig::from_env()?;

        let store = env_or_default("PRODUCT_STORE", "sql")
            .trim()
            .parse::<StoreKind>()
            .map_err(|_| eyre::eyre!("PRODUCT_STORE must be 'sql' or 'memory'"))?;

        let per_page = env_parse("PRODUCTS_PER_PAGE", DEFAULT_PER_PAGE)?.clamp(1, MAX_PER_PAGE);

        let cors_origins = env_or_default("CORS_ORIGINS", "*")
            .parse::<CorsOrigins>()
            .map_err(|e| eyre::eyre!("CORS_ORIGINS: {}", e))?;

        let seed_data = env_flag("SEED_DATA", environment.is_development())?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            database,
            per_page,
            cors_origins,
            seed_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "APP_ENV",
        "PRODUCT_STORE",
        "PRODUCTS_PER_PAGE",
        "CORS_ORIGINS",
        "SEED_DATA",
        "DATABASE_URL",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(unset_all(), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.store, StoreKind::Sql);
            assert_eq!(config.per_page, 20);
            assert_eq!(config.cors_origins, CorsOrigins::Any);
            assert_eq!(config.database.url, database::sql::DEFAULT_DATABASE_URL);
            assert!(config.seed_data, "seeding is on in development");
            assert_eq!(config.app.name, "products_api");
        });
    }

    #[test]
    fn test_production_does_not_seed_by_default() {
        let mut vars = unset_all();
        vars[0] = ("APP_ENV", Some("production"));
        temp_env::with_vars(vars, || {
            assert!(!Config::from_env().unwrap().seed_data);
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("PRODUCT_STORE", Some("Memory")),
                ("PRODUCTS_PER_PAGE", Some("500")),
                ("CORS_ORIGINS", Some("http://localhost:3000, https://shop.example.com")),
                ("SEED_DATA", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.store, StoreKind::Memory);
                assert_eq!(config.per_page, 100);
                assert!(matches!(config.cors_origins, CorsOrigins::List(ref o) if o.len() == 2));
                assert!(!config.seed_data);
            },
        );
    }

    #[test]
    fn test_invalid_values() {
        temp_env::with_var("PRODUCT_STORE", Some("mongo"), || {
            assert!(Config::from_env().is_err());
        });
        temp_env::with_var("PRODUCTS_PER_PAGE", Some("lots"), || {
            assert!(Config::from_env().is_err());
        });
        temp_env::with_var("PRODUCTS_PER_PAGE", Some("0"), || {
            assert_eq!(Config::from_env().unwrap().per_page, 1);
        });
    }

    #[test]
    fn test_store_kind_display() {
        assert_eq!(StoreKind::Sql.to_string(), "sql");
        assert_eq!(StoreKind::Memory.to_string(), "memory");
    }
}
