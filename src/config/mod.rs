// Configuration module entry point
// Resolves configuration from defaults, file, environment and command line

mod cli;
mod state;
pub mod types;

use std::net::SocketAddr;

pub use cli::CliArgs;
pub use state::AppState;
pub use types::Config;

/// Config file looked up in the working directory when `--config` is absent
const DEFAULT_CONFIG_NAME: &str = "pathecho";

/// Environment variable prefix, e.g. `PATHECHO_SERVER__PORT=8080`
const ENV_PREFIX: &str = "PATHECHO";

impl Config {
    /// Load configuration; command-line values take precedence over the
    /// environment, which takes precedence over the config file.
    pub fn load(cli: &CliArgs) -> Result<Self, config::ConfigError> {
        Self::load_with_env(cli, None)
    }

    /// Same as [`Config::load`]; `env` replaces the process environment
    /// when given.
    fn load_with_env(
        cli: &CliArgs,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match &cli.config {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 80)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default(
                "http.server_name",
                concat!("pathecho/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("performance.connection_timeout", 0)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("logging.level", cli.log_level.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pathecho-{}-{name}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::load(&CliArgs::default()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 80);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "common");
        assert!(config.logging.access_log_file.is_none());
        assert!(config.http.server_name.starts_with("pathecho/"));
        assert_eq!(config.performance.connection_timeout, 0);
    }

    #[test]
    fn test_positional_port() {
        let cli = CliArgs::parse_from(["pathecho", "8080"]);
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        assert!(CliArgs::try_parse_from(["pathecho", "http"]).is_err());
        assert!(CliArgs::try_parse_from(["pathecho", "70000"]).is_err());
    }

    #[test]
    fn test_toml_file() {
        let path = write_temp_config(
            "file",
            r#"
                [server]
                host = "127.0.0.1"
                port = 9000

                [logging]
                level = "debug"
                access_log = false
                access_log_format = "json"

                [performance]
                connection_timeout = 5
            "#,
        );
        let cli = CliArgs {
            config: Some(path.clone()),
            ..CliArgs::default()
        };
        let config = Config::load(&cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "json");
        assert_eq!(config.performance.connection_timeout, 5);
    }

    #[test]
    fn test_cli_overrides_file() {
        let path = write_temp_config(
            "override",
            r#"
                [server]
                port = 9000

                [logging]
                level = "debug"
            "#,
        );
        let cli = CliArgs {
            port: Some(8081),
            config: Some(path.clone()),
            log_level: Some("warn".to_string()),
        };
        let config = Config::load(&cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_environment_layer() {
        let path = write_temp_config(
            "env",
            r#"
                [server]
                port = 9000

                [logging]
                access_log = true
            "#,
        );
        let env: config::Map<String, String> = [
            ("PATHECHO_SERVER__PORT", "8181"),
            ("PATHECHO_LOGGING__ACCESS_LOG", "false"),
            ("PATHECHO_HTTP__SERVER_NAME", "envname"),
            ("OTHER_SERVER__PORT", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        // Environment wins over the file
        let cli = CliArgs {
            config: Some(path.clone()),
            ..CliArgs::default()
        };
        let config = Config::load_with_env(&cli, Some(env.clone())).unwrap();
        assert_eq!(config.server.port, 8181);
        assert!(!config.logging.access_log);
        assert_eq!(config.http.server_name, "envname");

        // Command line wins over the environment
        let cli = CliArgs {
            port: Some(8081),
            config: Some(path.clone()),
            ..CliArgs::default()
        };
        let config = Config::load_with_env(&cli, Some(env)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.http.server_name, "envname");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let cli = CliArgs {
            config: Some(std::env::temp_dir().join("pathecho-does-not-exist.toml")),
            ..CliArgs::default()
        };
        assert!(Config::load(&cli).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load(&CliArgs::parse_from(["pathecho", "8080"])).unwrap();
        assert_eq!(
            config.socket_addr().unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );

        let mut bad = config;
        bad.server.host = "not a host".to_string();
        assert!(bad.socket_addr().is_err());
    }
}
