//! Command-line arguments shared by the binaries.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::api_client::Command;
use crate::config::Config;
use crate::error::Result;

/// Options selecting which endpoint to talk to.
#[derive(Debug, Clone, Default, Args)]
pub struct EndpointArgs {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Door endpoint URL, overriding the configuration file and environment
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Request timeout in seconds; no timeout unless set
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments of `door-cli`.
#[derive(Debug, Parser)]
#[command(name = "door-cli", version, about = "Send an Up or Down command to the door")]
pub struct SendCli {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Direction to send: up or down
    pub direction: Command,
}

impl EndpointArgs {
    /// Resolve the configuration: defaults, file, environment, then flags.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::default(),
        };
        config.apply_env()?;
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.endpoint.url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.endpoint.timeout_secs = Some(secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        endpoint: EndpointArgs,
    }

    #[test]
    fn flags_parse() {
        let cli = TestCli::parse_from([
            "test",
            "--url",
            "http://127.0.0.1:5000/api/door",
            "--timeout",
            "7",
        ]);
        assert_eq!(
            cli.endpoint.url.as_deref(),
            Some("http://127.0.0.1:5000/api/door")
        );
        assert_eq!(cli.endpoint.timeout, Some(7));
        assert_eq!(cli.endpoint.config, None);
    }

    #[test_case("up", Command::Up ; "lowercase up")]
    #[test_case("Up", Command::Up ; "capitalized up")]
    #[test_case("DOWN", Command::Down ; "uppercase down")]
    fn direction_parses_as_command(arg: &str, expected: Command) {
        let cli = SendCli::try_parse_from(["door-cli", "--timeout", "2", arg]).unwrap();
        assert_eq!(cli.direction, expected);
        assert_eq!(cli.endpoint.timeout, Some(2));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        assert!(SendCli::try_parse_from(["door-cli", "left"]).is_err());
        assert!(SendCli::try_parse_from(["door-cli"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::from_toml(
            "[endpoint]\nurl = \"http://file.example/api/door\"\ntimeout_secs = 30\n",
        )
        .unwrap();
        let args = EndpointArgs {
            config: None,
            url: Some("http://flag.example/api/door".into()),
            timeout: None,
        };

        args.apply_to(&mut config);

        assert_eq!(config.endpoint.url, "http://flag.example/api/door");
        assert_eq!(config.endpoint.timeout_secs, Some(30));
    }
}
