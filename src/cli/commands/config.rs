//! `fha config` command - Configuration management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::workspace::discover;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{DEFAULT_MAX_GROUPS, DEFAULT_TABLE_FILE};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (see `fha config keys`)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("table_file", "Working table file, relative to the project root"),
    (
        "default_format",
        "Default output format (yaml, json, tsv, csv, md, id)",
    ),
    ("max_groups", "Breakdown groups shown before collapsing into Other"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover(global).ok();
    let config = Config::load_for(project.as_ref());

    if let Some(key) = &args.key {
        check_key(key)?;
        println!("{}", effective_value(&config, key));
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        println!(
            "  {}: {}",
            style(key).cyan(),
            style(effective_value(&config, key)).yellow()
        );
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (FHA_TABLE_FILE, FHA_FORMAT)");
    println!("  2. Project config (.fha/config.yaml)");
    println!("  3. Global config (~/.config/fha/config.yaml)");
    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let value = parse_value(&args.key, &args.value)?;

    let config_path = if args.global {
        global_config_path()?
    } else {
        project_config_path(global)?
    };

    let mut config_map = read_mapping(&config_path)?;
    config_map.insert(serde_yml::Value::String(args.key.clone()), value);

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );
    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    let config_path = if args.global {
        global_config_path()?
    } else {
        project_config_path(global)?
    };

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    let removed = config_map
        .remove(serde_yml::Value::String(args.key.clone()))
        .is_some();
    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Removed {} from {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        scope
    );
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let global_path = global_config_path()?;

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    print_exists(global_path.exists(), 9);

    println!();
    match project_config_path(global) {
        Ok(path) => {
            println!("  {} {}", style("Project:").cyan(), path.display());
            print_exists(path.exists(), 10);
        }
        Err(_) => println!(
            "  {} {}",
            style("Project:").cyan(),
            style("(not in an FHA project)").dim()
        ),
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'fha config set <key> <value>' to set a value.").dim()
    );
    Ok(())
}

fn print_exists(exists: bool, indent: usize) {
    let marker = if exists {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("{:indent$}{}", "", marker, indent = indent);
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            "Unknown configuration key '{}' (see `fha config keys`)",
            key
        ))
    }
}

/// Validate a value for `key` and convert it to its stored YAML form
fn parse_value(key: &str, value: &str) -> Result<serde_yml::Value> {
    match key {
        "max_groups" => {
            let groups: u64 = value
                .trim()
                .parse()
                .map_err(|_| miette::miette!("max_groups must be a positive integer"))?;
            if groups == 0 {
                return Err(miette::miette!("max_groups must be a positive integer"));
            }
            Ok(serde_yml::Value::Number(groups.into()))
        }
        "default_format" => {
            <OutputFormat as clap::ValueEnum>::from_str(value, true)
                .map_err(|_| miette::miette!("Unknown output format '{}'", value))?;
            Ok(serde_yml::Value::String(value.to_lowercase()))
        }
        _ => Ok(serde_yml::Value::String(value.to_string())),
    }
}

fn effective_value(config: &Config, key: &str) -> String {
    match key {
        "table_file" => config
            .table_file
            .clone()
            .unwrap_or_else(|| format!("{} (default)", DEFAULT_TABLE_FILE)),
        "default_format" => config
            .default_format
            .clone()
            .unwrap_or_else(|| "auto (default)".to_string()),
        "max_groups" => config
            .max_groups
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("{} (default)", DEFAULT_MAX_GROUPS)),
        _ => String::new(),
    }
}

fn read_mapping(path: &Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content) {
        Ok(serde_yml::Value::Mapping(map)) => Ok(map),
        Ok(serde_yml::Value::Null) => Ok(serde_yml::Mapping::new()),
        Ok(_) => Err(miette::miette!(
            "Config file is not a mapping: {}",
            path.display()
        )),
        Err(e) => Err(miette::miette!("{}: {}", path.display(), e)),
    }
}

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn project_config_path(global: &GlobalOpts) -> Result<PathBuf> {
    Ok(discover(global)?.config_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_max_groups() {
        assert_eq!(
            parse_value("max_groups", " 5 ").unwrap(),
            serde_yml::Value::Number(5u64.into())
        );
        assert!(parse_value("max_groups", "0").is_err());
        assert!(parse_value("max_groups", "many").is_err());
    }

    #[test]
    fn test_parse_value_default_format() {
        assert_eq!(
            parse_value("default_format", "JSON").unwrap(),
            serde_yml::Value::String("json".into())
        );
        assert!(parse_value("default_format", "xml").is_err());
    }

    #[test]
    fn test_effective_value_defaults() {
        let config = Config::default();
        assert_eq!(effective_value(&config, "table_file"), "fha-table.csv (default)");
        assert_eq!(effective_value(&config, "max_groups"), "9 (default)");
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("table_file").is_ok());
        assert!(check_key("author").is_err());
    }
}
