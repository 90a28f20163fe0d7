//! Configuration for the MCP server

use core_config::{AppInfo, FromEnv, app_info, env_flag};
use joke_mcp::JokeClientConfig;

pub use core_config::Environment;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub joke: JokeClientConfig,
    /// Start the catalog tools with the sample products
    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let joke = JokeClientConfig::from_env()?;
        let seed_data = env_flag("SEED_DATA", environment.is_development())?;

        Ok(Self {
            app: app_info!(),
            environment,
            joke,
            seed_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("APP_ENV", None::<&str>),
                ("SEED_DATA", None),
                ("JOKE_API_URL", None),
                ("JOKE_API_TIMEOUT_SECS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.joke.base_url, joke_mcp::DEFAULT_JOKE_API_URL);
                assert!(config.seed_data);
                assert_eq!(config.app.name, "mcp_server");
            },
        );
    }

    #[test]
    fn test_invalid_seed_flag() {
        temp_env::with_var("SEED_DATA", Some("sometimes"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
