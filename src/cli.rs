//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Identikit - random identity generator service
///
/// Serves an HTML page that fabricates a plausible identity (name,
/// gender, phone, street address) for a selected country, using
/// OpenStreetMap reverse geocoding and randomuser.me.
///
/// Examples:
///   identikit
///   identikit --bind 127.0.0.1:3000 --country CH
///   identikit --oneshot --format json
///   identikit --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Socket address to listen on
    ///
    /// Overrides the config file. Default: 0.0.0.0:8080.
    #[arg(short, long, value_name = "ADDR", env = "IDENTIKIT_BIND")]
    pub bind: Option<String>,

    /// Default country code for requests without ?country=
    ///
    /// Supported: AU, CH. Overrides the config file.
    #[arg(short = 'C', long, value_name = "CODE", env = "IDENTIKIT_COUNTRY")]
    pub country: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .identikit.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Upstream request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum reverse-geocoding attempts per request
    #[arg(long, value_name = "COUNT")]
    pub max_attempts: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a single identity, print it to stdout, and exit
    ///
    /// No server is started.
    #[arg(long)]
    pub oneshot: bool,

    /// Output format for --oneshot (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Generate a default .identikit.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for --oneshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref bind) = self.bind {
            if bind.parse::<std::net::SocketAddr>().is_err() {
                return Err(format!("Invalid bind address: {}", bind));
            }
        }

        if let Some(ref country) = self.country {
            if country.parse::<crate::geo::CountryCode>().is_err() {
                return Err(format!(
                    "Unsupported country code: {} (supported: AU, CH)",
                    country
                ));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(max_attempts) = self.max_attempts {
            if max_attempts == 0 {
                return Err("Max attempts must be at least 1".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            bind: None,
            country: None,
            config: None,
            timeout: None,
            max_attempts: None,
            verbose: false,
            quiet: false,
            oneshot: false,
            format: OutputFormat::Text,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_defaults_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_bind() {
        let mut args = make_args();
        args.bind = Some("nope".to_string());
        assert!(args.validate().is_err());

        args.bind = Some("127.0.0.1:3000".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_unknown_country() {
        let mut args = make_args();
        args.country = Some("XX".to_string());
        assert!(args.validate().is_err());

        args.country = Some("ch".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
