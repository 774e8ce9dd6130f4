//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rate-limited Reddit thing API client
#[derive(Parser, Debug)]
#[command(name = "reddit-things")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API root
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the user agent
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one path and print the response
    Get {
        /// Resource path, e.g. r/rust/about
        path: String,

        /// Print the raw response instead of the normalized one
        #[arg(long)]
        raw: bool,

        /// Extra query parameter (key=value), repeatable
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Stream every item of a listing, one per line
    Listing {
        /// Listing path, e.g. r/rust/new
        path: String,

        /// Stop after this many items
        #[arg(long)]
        max: Option<usize>,

        /// Extra query parameter (key=value), repeatable
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Fetch things by fullname, e.g. t3_abc123
    ById {
        /// Fullname(s), comma-separated
        id: String,
    },

    /// Count listing items by UTC hour of creation
    Hours {
        /// Listing path, e.g. r/rust/new
        path: String,

        /// Stop after this many items
        #[arg(long, default_value = "1000")]
        max: usize,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse a `key=value` argument
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("t=week").unwrap(),
            ("t".to_string(), "week".to_string())
        );
        assert_eq!(
            parse_key_value("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_cli_parses_listing() {
        let cli = Cli::try_parse_from([
            "reddit-things",
            "listing",
            "r/rust/new",
            "--max",
            "5",
            "-q",
            "t=day",
            "--base-url",
            "http://localhost:1",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1"));
        match cli.command {
            Commands::Listing { path, max, query } => {
                assert_eq!(path, "r/rust/new");
                assert_eq!(max, Some(5));
                assert_eq!(query, vec![("t".to_string(), "day".to_string())]);
            }
            other => panic!("Expected Listing, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
