//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for Rivals Insights.

use clap::{Parser, Subcommand};

/// Rivals Insights - team composition analysis and media URL resolution
///
/// Analyzes hero rosters (role balance, mutual synergies, strengths and
/// weaknesses) and resolves character artwork references into absolute URLs.
#[derive(Parser, Debug)]
#[command(name = "rivals-insights")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a roster document (JSON file, or '-' for stdin)
    Analyze {
        /// Roster JSON: an object with "members" or a bare array of entries
        roster: String,

        /// Path to configuration file
        #[arg(short, long, env = "RIVALS_CONFIG")]
        config: Option<String>,

        /// Include extended diagnostics (single-role and damage overload warnings)
        #[arg(short, long)]
        extended: bool,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a raw media reference into an absolute URL
    Media {
        /// Absolute, protocol-relative or backend-relative reference
        reference: String,

        /// How the image is displayed: avatar, portrait, banner
        #[arg(short, long, default_value = "portrait")]
        kind: String,

        /// Path to configuration file
        #[arg(short, long, env = "RIVALS_CONFIG")]
        config: Option<String>,
    },

    /// Resolve the artwork URL for a character or roster slot
    Artwork {
        /// Character or slot JSON (file path, or '-' for stdin)
        character: String,

        /// Path to configuration file
        #[arg(short, long, env = "RIVALS_CONFIG")]
        config: Option<String>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from(["rivals-insights", "analyze", "team.json"]);
        match cli.command {
            Commands::Analyze { roster, config, extended, json } => {
                assert_eq!(roster, "team.json");
                assert!(config.is_none());
                assert!(!extended);
                assert!(!json);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::parse_from(["rivals-insights", "analyze", "-", "--extended", "--json"]);
        match cli.command {
            Commands::Analyze { roster, extended, json, .. } => {
                assert_eq!(roster, "-");
                assert!(extended);
                assert!(json);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_media_default_kind() {
        let cli = Cli::parse_from(["rivals-insights", "media", "heroes/thor.png"]);
        match cli.command {
            Commands::Media { reference, kind, .. } => {
                assert_eq!(reference, "heroes/thor.png");
                assert_eq!(kind, "portrait");
            }
            _ => panic!("Expected Media command"),
        }
    }

    #[test]
    fn test_media_with_kind() {
        let cli = Cli::parse_from(["rivals-insights", "media", "x.png", "--kind", "banner"]);
        match cli.command {
            Commands::Media { kind, .. } => assert_eq!(kind, "banner"),
            _ => panic!("Expected Media command"),
        }
    }

    #[test]
    fn test_artwork_command() {
        let cli = Cli::parse_from(["rivals-insights", "artwork", "hero.json", "-c", "insights.toml"]);
        match cli.command {
            Commands::Artwork { character, config } => {
                assert_eq!(character, "hero.json");
                assert_eq!(config, Some("insights.toml".to_string()));
            }
            _ => panic!("Expected Artwork command"),
        }
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["rivals-insights", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["rivals-insights", "--quiet", "version"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_show() {
        let cli = Cli::parse_from(["rivals-insights", "config", "show"]);
        match cli.command {
            Commands::Config { subcommand: ConfigSubcommand::Show { config } } => {
                assert!(config.is_none());
            }
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["rivals-insights", "config", "init", "--force"]);
        match cli.command {
            Commands::Config { subcommand: ConfigSubcommand::Init { path, force } } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
