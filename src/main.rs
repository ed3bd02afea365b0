//! Rivals Insights - team composition analysis and media URL resolution
//!
//! This is the main entry point for the `rivals-insights` binary.
//! Results go to stdout; logs and errors go to stderr.

use std::fs;
use std::io::Read;

use clap::Parser;
use serde::Deserialize;
use tracing::{debug, info, warn};

use rivals_insights::analysis::{DiagnosticsMode, TeamInsights};
use rivals_insights::cli::{Cli, Commands, ConfigSubcommand};
use rivals_insights::config::{self, InsightsConfig};
use rivals_insights::error::{Error, Result};
use rivals_insights::logging::{self, LogGuards};
use rivals_insights::media::{ImageKind, MediaResolver};
use rivals_insights::types::{ResolveCharacter, Role, Roster, RosterEntry, MAX_DIFFICULTY};
use rivals_insights::version;

/// Exit code when a reference resolves to no URL
const EXIT_UNRESOLVED: i32 = 3;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    }
}

/// Dispatch a command, returning the process exit code
fn run(cli: Cli) -> Result<i32> {
    // For commands that don't need full logging, use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(0);
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        _ => {}
    }

    let config_path = match &cli.command {
        Commands::Analyze { config, .. }
        | Commands::Media { config, .. }
        | Commands::Artwork { config, .. } => config.clone(),
        Commands::Version | Commands::Config { .. } => None,
    };

    let config = InsightsConfig::load(config_path.as_deref())?;

    // The guards must be kept alive until the command finishes
    let _log_guards = init_logging_from_config(&config, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(version = %build.full_version(), "Starting Rivals Insights");

    let result = match cli.command {
        Commands::Analyze { roster, extended, json, .. } => {
            run_analyze(&config, &roster, extended, json)
        }
        Commands::Media { reference, kind, .. } => run_media(&config, &reference, &kind),
        Commands::Artwork { character, .. } => run_artwork(&config, &character),
        Commands::Version | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    };

    // Recorded while the file guard is still alive
    if let Err(ref e) = result {
        debug!(error = %e.format_for_log(), "Command failed");
    }

    result
}

/// Initialize logging from configuration
fn init_logging_from_config(config: &InsightsConfig, verbose: u8, quiet: bool) -> Result<LogGuards> {
    logging::init_logging(&config.logging, verbose, quiet)
}

// ─────────────────────────────────────────────────────────────────
// Input Documents
// ─────────────────────────────────────────────────────────────────

/// A roster document: a roster object or a bare array of entries
#[derive(Deserialize)]
#[serde(untagged)]
enum RosterDocument {
    Entries(Vec<RosterEntry>),
    Roster(Roster),
}

impl From<RosterDocument> for Roster {
    fn from(doc: RosterDocument) -> Self {
        match doc {
            RosterDocument::Entries(entries) => Roster::from_entries(entries),
            RosterDocument::Roster(roster) => roster,
        }
    }
}

/// Read a JSON document from stdin (`-`), inline JSON, or a file path
fn read_document(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let trimmed = source.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(source.to_string());
    }

    fs::read_to_string(source).map_err(|e| Error::IoRead {
        path: source.into(),
        source: e,
    })
}

fn source_name(source: &str) -> String {
    if source == "-" {
        "<stdin>".to_string()
    } else if source.trim_start().starts_with(['{', '[']) {
        "<inline>".to_string()
    } else {
        source.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────

/// Analyze a roster document and print the insights
fn run_analyze(config: &InsightsConfig, source: &str, extended: bool, json: bool) -> Result<i32> {
    let raw = read_document(source)?;
    let roster: Roster = serde_json::from_str::<RosterDocument>(&raw)
        .map_err(|e| Error::RosterMalformed {
            source_name: source_name(source),
            source: e,
        })?
        .into();

    let capacity = config.analysis.roster_capacity;
    if roster.exceeds(capacity) {
        warn!(
            members = roster.len(),
            capacity,
            "Roster exceeds capacity, analyzing all members"
        );
    }

    let mode = DiagnosticsMode::from_flag(extended || config.analysis.extended_diagnostics);
    let members = roster.sorted_members();
    let insights = TeamInsights::analyze(&members, mode);

    info!(
        roster = roster.name.as_deref().unwrap_or("(unnamed)"),
        status = %insights.composition.status,
        "Analysis complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print_report(&roster, &members, &insights, config.analysis.synergy_preview);
    }

    Ok(0)
}

/// Human-readable analysis report
fn print_report(roster: &Roster, members: &[&RosterEntry], insights: &TeamInsights, preview: usize) {
    let composition = &insights.composition;

    println!();
    match roster.name.as_deref() {
        Some(name) => println!("Team Analysis: {}", name),
        None => println!("Team Analysis"),
    }
    println!("  Status: {} - {}", composition.status, composition.message);

    println!();
    println!("Members ({}):", members.len());
    for entry in members {
        let Some(character) = entry.character() else {
            println!("  [{}] (empty slot)", entry.position());
            continue;
        };
        let name = character.display_name().unwrap_or("(unnamed)");
        let role = character.role.map(|r| r.display_name()).unwrap_or("Unknown");
        match character.difficulty_rating() {
            Some(d) => println!("  [{}] {} - {} ({}/{})", entry.position(), name, role, d, MAX_DIFFICULTY),
            None => println!("  [{}] {} - {}", entry.position(), name, role),
        }
    }

    println!();
    println!("Role Breakdown:");
    for role in Role::all() {
        println!("  {:<12} {}", role.plural_label(), insights.role_counts.get(*role));
    }

    let synergies = insights.synergy_preview(preview);
    if !synergies.is_empty() {
        println!();
        println!("Synergies:");
        for pair in synergies {
            println!("  {}", pair);
        }
        if insights.synergies.len() > synergies.len() {
            println!("  ... and {} more", insights.synergies.len() - synergies.len());
        }
    }

    if !composition.strengths.is_empty() {
        println!();
        println!("Strengths:");
        for s in &composition.strengths {
            println!("  + {}", s);
        }
    }

    if !composition.weaknesses.is_empty() {
        println!();
        println!("Weaknesses:");
        for w in &composition.weaknesses {
            println!("  - {}", w);
        }
    }
}

/// Resolve a single media reference
fn run_media(config: &InsightsConfig, reference: &str, kind: &str) -> Result<i32> {
    let kind: ImageKind = kind
        .parse()
        .map_err(|message: String| Error::invalid_argument("--kind", message))?;

    let resolver = MediaResolver::new(&config.media);
    match resolver.build_media_url(Some(reference), kind) {
        Some(url) => {
            println!("{}", url);
            Ok(0)
        }
        None => {
            warn!(reference, "Reference does not resolve to a URL");
            Ok(EXIT_UNRESOLVED)
        }
    }
}

/// Resolve the artwork for a character or slot document
fn run_artwork(config: &InsightsConfig, source: &str) -> Result<i32> {
    let raw = read_document(source)?;
    let entry: RosterEntry =
        serde_json::from_str(&raw).map_err(|e| Error::CharacterMalformed {
            source_name: source_name(source),
            source: e,
        })?;

    let resolver = MediaResolver::new(&config.media);
    match resolver.resolve_character_artwork(&entry) {
        Some(url) => {
            println!("{}", url);
            Ok(0)
        }
        None => {
            warn!("Character has no resolvable artwork");
            Ok(EXIT_UNRESOLVED)
        }
    }
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand) -> Result<i32> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = InsightsConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            InsightsConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(0)
}
