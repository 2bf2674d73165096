//! Handler for `nodestyle config`.

use miette::Result;

use crate::cli::ConfigArgs;

pub fn exec(args: &ConfigArgs) -> Result<()> {
    let config = super::load_config(args)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
