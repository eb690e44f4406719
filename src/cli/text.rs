//! Text subcommands: template expansion, truncation and env-name mapping

use anyhow::Result;
use clap::Args;
use cmdkit::config::ConfigContext;
use cmdkit::utils::{ellipsis_string, map_params, truncate_string};

use super::settings::ENV_PREFIX;
use super::utils::{char_limit, merge_params, parse_param};
use super::Resolved;

#[derive(Args)]
pub struct ExpandArgs {
    /// Path template such as /users/:id/posts
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Parameter to substitute, layered over expand.params (repeatable)
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

#[derive(Args)]
pub struct TruncateArgs {
    /// Text to shorten
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Character limit (overrides truncate.limit)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Mark truncated text with "..." inside the limit
    #[arg(short, long)]
    pub ellipsis: bool,
}

#[derive(Args)]
pub struct EnvNameArgs {
    /// Setting name such as log.level
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Variable prefix; empty for none
    #[arg(short, long, value_name = "PREFIX", default_value = ENV_PREFIX)]
    pub prefix: String,
}

pub fn expand(args: ExpandArgs, resolved: &Resolved) -> Result<()> {
    let params = merge_params(&resolved.settings.expand_params, &args.params);
    println!("{}", map_params(&args.template, &params));
    Ok(())
}

pub fn truncate(args: TruncateArgs, resolved: &Resolved) -> Result<()> {
    let limit = char_limit(args.limit.unwrap_or(resolved.settings.truncate_limit))?;
    let output = if args.ellipsis {
        ellipsis_string(&args.text, limit)
    } else {
        truncate_string(&args.text, limit)
    };
    println!("{output}");
    Ok(())
}

pub fn env_name(args: EnvNameArgs) -> Result<()> {
    println!("{}", ConfigContext::new(args.prefix).env_key(&args.name));
    Ok(())
}
