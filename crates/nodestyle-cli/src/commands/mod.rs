//! Command dispatch and handler modules.

mod config;
mod resolve;

use std::collections::BTreeMap;

use miette::Result;

use nodestyle_core::config::{ConfigOverrides, ResolverConfig, StyleOverride};
use nodestyle_util::errors::StyleError;

use crate::cli::{Cli, Command, ConfigArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve { config, format } => resolve::exec(&config, format),
        Command::Config { config } => config::exec(&config),
    }
}

/// Build the effective configuration: defaults, then the configuration
/// file, then command-line flags.
fn load_config(args: &ConfigArgs) -> Result<ResolverConfig> {
    let file = match &args.config {
        Some(path) => ConfigOverrides::load(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(StyleError::Io)?;
            ConfigOverrides::discover(&cwd)?
        }
    };
    let flags = flag_overrides(args)?;
    Ok(file.layered_with(flags).into_config())
}

fn flag_overrides(args: &ConfigArgs) -> Result<ConfigOverrides> {
    let skip = (!args.skip.is_empty())
        .then(|| args.skip.iter().map(|name| (name.clone(), true)).collect());

    let overrides = if args.overrides.is_empty() {
        None
    } else {
        let mut map = BTreeMap::new();
        for raw in &args.overrides {
            let (name, value) = split_pair(raw, "--override")?;
            let style = if value.contains(',') {
                StyleOverride::Multi(value.split(',').map(str::to_string).collect())
            } else {
                StyleOverride::Single(value.to_string())
            };
            map.insert(name.to_string(), style);
        }
        Some(map)
    };

    let order = if args.order.is_empty() {
        None
    } else {
        let mut map = BTreeMap::new();
        for raw in &args.order {
            let (name, value) = split_pair(raw, "--order")?;
            let position = value.parse::<i64>().map_err(|e| StyleError::Config {
                message: format!("Invalid --order value '{raw}': {e}"),
            })?;
            map.insert(name.to_string(), position);
        }
        Some(map)
    };

    Ok(ConfigOverrides {
        manifest_path: args.manifest.clone(),
        modules_dir: args.modules_dir.clone(),
        skip,
        overrides,
        order,
    })
}

fn split_pair<'a>(raw: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(StyleError::Config {
            message: format!("Expected NAME=VALUE for {flag}, got '{raw}'"),
        }
        .into()),
    }
}
