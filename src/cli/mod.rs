use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "jobly-api")]
#[command(about = "Jobly API - companies, jobs and users over HTTP")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,
}

impl Cli {
    /// Resolve the bind address, preferring flags over configuration.
    pub fn bind_address(&self, config: &crate::config::ApiConfig) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| config.host.clone()),
            self.port.unwrap_or(config.port),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn api() -> ApiConfig {
        ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            enable_request_logging: false,
            max_request_size_bytes: 1024,
        }
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["jobly-api", "--port", "4000"]);
        assert_eq!(cli.bind_address(&api()), ("127.0.0.1".to_string(), 4000));

        let cli = Cli::parse_from(["jobly-api", "--host", "0.0.0.0"]);
        assert_eq!(cli.bind_address(&api()), ("0.0.0.0".to_string(), 3001));
    }
}
