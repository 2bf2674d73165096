//! Handler for `nodestyle resolve`.

use miette::Result;

use nodestyle_resolver::{flatten, resolve_entries};
use nodestyle_util::errors::StyleError;

use crate::cli::{ConfigArgs, OutputFormat};

pub fn exec(args: &ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = super::load_config(args)?;
    let entries = resolve_entries(&config)?;

    match format {
        OutputFormat::Lines => {
            for path in flatten(&entries) {
                println!("{path}");
            }
        }
        OutputFormat::Json => println!("{}", to_json(&flatten(&entries))?),
        OutputFormat::Entries => println!("{}", to_json(&entries)?),
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        StyleError::Generic {
            message: format!("Failed to serialize output: {e}"),
        }
        .into()
    })
}
