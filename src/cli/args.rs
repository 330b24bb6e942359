//! Command-line argument parsing.

use crate::config::{ChatConfig, TransportKind};
use crate::error::ConfigError;

/// Overrides given on the command line; unset fields keep the environment's value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub base_url: Option<String>,
    pub transport: Option<TransportKind>,
}

impl CliOptions {
    /// Layer these options over `config`.
    pub fn apply(&self, mut config: ChatConfig) -> Result<ChatConfig, ConfigError> {
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(transport) = self.transport {
            config = config.with_transport(transport);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Check backend health and list datasets, then exit
    Check(CliOptions),
    /// Run the interactive chat (default)
    Chat(CliOptions),
}

/// Parse command-line arguments and return the appropriate command.
///
/// Accepts `--url <URL>`, `--url=<URL>`, `--transport <fetch|eventsource>`,
/// `--transport=<..>`, `--check`, `--version`/`-V` and `--help`/`-h`.
///
/// # Examples
///
/// ```
/// use orbital::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["orbital".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut check = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        let (flag, inline_value) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--check" => check = true,
            "--url" => {
                let value = take_value(&flag, inline_value, &mut args)?;
                options.base_url = Some(value);
            }
            "--transport" => {
                let value = take_value(&flag, inline_value, &mut args)?;
                options.transport = Some(value.parse()?);
            }
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }

    if check {
        Ok(CliCommand::Check(options))
    } else {
        Ok(CliCommand::Chat(options))
    }
}

fn take_value<I>(flag: &str, inline: Option<String>, rest: &mut I) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| rest.next())
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

/// Usage text for `--help`
pub fn usage() -> String {
    format!(
        "orbital {}\n\
         Streaming chat client for the Orbital data analysis agent\n\n\
         USAGE:\n    orbital [OPTIONS]\n\n\
         OPTIONS:\n\
         \x20   --url <URL>            Backend base URL (env: {}, default: {})\n\
         \x20   --transport <KIND>     fetch | eventsource (env: {}, default: fetch)\n\
         \x20   --check                Check the backend and list datasets, then exit\n\
         \x20   -V, --version          Print version\n\
         \x20   -h, --help             Print this help\n\n\
         COMMANDS (while chatting):\n\
         \x20   /stop      Stop the current response (also Ctrl+C)\n\
         \x20   /clear     Start a new session\n\
         \x20   /datasets  List available datasets\n\
         \x20   /quit      Exit",
        super::VERSION,
        crate::config::API_URL_ENV,
        crate::config::DEFAULT_BASE_URL,
        crate::config::TRANSPORT_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ConfigError> {
        let args: Vec<String> = std::iter::once("orbital")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), Ok(CliCommand::Chat(CliOptions::default())));
    }

    #[test]
    fn test_parse_url_and_transport() {
        let expected = CliOptions {
            base_url: Some("http://10.0.0.5:8000".to_string()),
            transport: Some(TransportKind::EventSource),
        };
        assert_eq!(
            parse(&["--url", "http://10.0.0.5:8000", "--transport", "eventsource"]),
            Ok(CliCommand::Chat(expected.clone()))
        );
        assert_eq!(
            parse(&["--url=http://10.0.0.5:8000", "--transport=eventsource"]),
            Ok(CliCommand::Chat(expected))
        );
    }

    #[test]
    fn test_parse_check() {
        assert_eq!(
            parse(&["--check", "--url", "http://h:1"]),
            Ok(CliCommand::Check(CliOptions {
                base_url: Some("http://h:1".to_string()),
                transport: None,
            }))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse(&["--url"]),
            Err(ConfigError::MissingValue("--url".to_string()))
        );
        assert_eq!(
            parse(&["--transport", "smoke-signals"]),
            Err(ConfigError::UnknownTransport("smoke-signals".to_string()))
        );
        assert_eq!(
            parse(&["--unknown"]),
            Err(ConfigError::UnknownArgument("--unknown".to_string()))
        );
    }

    #[test]
    fn test_options_apply() {
        let options = CliOptions {
            base_url: Some("https://agent.example.com/".to_string()),
            transport: None,
        };
        let config = options
            .apply(ChatConfig::new().with_transport(TransportKind::EventSource))
            .unwrap();
        assert_eq!(config.base_url, "https://agent.example.com");
        assert_eq!(config.transport, TransportKind::EventSource);

        let bad = CliOptions {
            base_url: Some("localhost".to_string()),
            transport: None,
        };
        assert!(bad.apply(ChatConfig::new()).is_err());
    }
}
