//! URL subcommands

use anyhow::Result;
use clap::Args;
use cmdkit::utils::{get_path_from_url, mask_password};

#[derive(Args)]
pub struct MaskUrlArgs {
    /// URL that may carry user:password credentials
    #[arg(value_name = "URL")]
    pub url: String,
}

#[derive(Args)]
pub struct UrlPathArgs {
    /// Absolute or relative URL
    #[arg(value_name = "URL")]
    pub url: String,
}

pub fn mask_url(args: MaskUrlArgs) -> Result<()> {
    println!("{}", mask_password(&args.url));
    Ok(())
}

pub fn url_path(args: UrlPathArgs) -> Result<()> {
    println!("{}", get_path_from_url(&args.url));
    Ok(())
}
