use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, Environment, FromEnv};

/// Configuration for the gateway process.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Base URL of the core API service, including its `/api` prefix
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let api_base_url = env_or_default("API_BASE_URL", "http://localhost:9090/api");

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            api_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_default() {
        temp_env::with_var_unset("API_BASE_URL", || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.api_base_url, "http://localhost:9090/api");
        });
    }

    #[test]
    fn test_api_base_url_override() {
        temp_env::with_var("API_BASE_URL", Some("http://core:9090/api"), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.api_base_url, "http://core:9090/api");
        });
    }
}
