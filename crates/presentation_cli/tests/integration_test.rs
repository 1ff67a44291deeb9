//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "weather-widget")]
#[command(author, version, about = "Current weather for any city", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    Show {
        city: Option<String>,
        #[arg(long)]
        dark: bool,
    },
    Interactive {
        #[arg(long)]
        dark: bool,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_defaults_to_no_subcommand() {
    let cli = parse_args(&["weather-widget"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_parses_show_command() {
    let cli = parse_args(&["weather-widget", "show"]).unwrap();
    if let Some(Commands::Show { city, dark }) = cli.command {
        assert!(city.is_none());
        assert!(!dark);
    } else {
        panic!("Expected Show command");
    }
}

#[test]
fn cli_parses_show_with_city() {
    let cli = parse_args(&["weather-widget", "show", "New York"]).unwrap();
    if let Some(Commands::Show { city, .. }) = cli.command {
        assert_eq!(city.as_deref(), Some("New York"));
    } else {
        panic!("Expected Show command");
    }
}

#[test]
fn cli_parses_show_dark_flag() {
    let cli = parse_args(&["weather-widget", "show", "Oslo", "--dark"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Show { dark: true, .. })));
}

#[test]
fn cli_parses_interactive_command() {
    let cli = parse_args(&["weather-widget", "interactive", "--dark"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Interactive { dark: true })));
}

#[test]
fn cli_show_rejects_two_cities() {
    let result = parse_args(&["weather-widget", "show", "Oslo", "Lima"]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.toml");
    let path_str = path.to_str().unwrap();

    let cli = parse_args(&["weather-widget", "--config", path_str, "show"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(path.as_path()));
}

#[test]
fn cli_short_config_flag_works() {
    let cli = parse_args(&["weather-widget", "-c", "custom.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
}

#[test]
fn cli_api_key_flag() {
    let cli = parse_args(&["weather-widget", "--api-key", "abc123", "show"]).unwrap();
    assert_eq!(cli.api_key.as_deref(), Some("abc123"));
}

#[test]
fn cli_parses_verbose_flag() {
    let cli = parse_args(&["weather-widget", "-v", "show"]).unwrap();
    assert_eq!(cli.verbose, 1);
}

#[test]
fn cli_parses_multiple_verbose_flags() {
    let cli = parse_args(&["weather-widget", "-vvv"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn cli_verbosity_zero_by_default() {
    let cli = parse_args(&["weather-widget", "show"]).unwrap();
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_rejects_unknown_subcommand() {
    let result = parse_args(&["weather-widget", "forecast"]);
    assert!(result.is_err());
}
