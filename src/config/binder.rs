//! Flag registration and precedence resolution
//!
//! Precedence per binding, highest first: command-line flag, environment
//! variable, structured config source, declared default.

use super::binding::{Binding, FlagSpec, Slot, Target, ValueOrigin};
use super::context::ConfigContext;
use super::decode::{self, StringMap};
use super::error::{BindingError, FlagError};
use clap::builder::BoolishValueParser;
use clap::parser::{MatchesError, ValueSource};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;
use std::ffi::OsString;
use std::time::Duration;

/// Winning origin of every binding, in binding order.
pub type Provenance = Vec<(String, ValueOrigin)>;

/// Registers bindings as flags and writes resolved values into their destinations.
pub struct ConfigBinder<'a> {
    bindings: Vec<Binding<'a>>,
}

impl<'a> ConfigBinder<'a> {
    pub fn new(bindings: Vec<Binding<'a>>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding<'a>] {
        &self.bindings
    }

    /// Add one flag per binding to `command`.
    pub fn register(&self, mut command: Command) -> Result<Command, BindingError> {
        for binding in &self.bindings {
            let spec = &binding.spec;
            check_available(&command, spec).map_err(|e| BindingError::flag(&spec.name, e))?;

            command = match &binding.target {
                Target::Custom(resolver) => {
                    resolver.register(command, spec).map_err(|e| BindingError::flag(&spec.name, e))?
                }
                target => command.arg(flag_arg(spec, target, binding.default_text.as_deref())),
            };
        }
        Ok(command)
    }

    /// Resolve every binding against `matches` and `ctx`.
    pub fn resolve(
        &mut self,
        ctx: &ConfigContext,
        matches: &ArgMatches,
    ) -> Result<Provenance, BindingError> {
        let mut provenance = Vec::with_capacity(self.bindings.len());
        for binding in &mut self.bindings {
            let spec = &binding.spec;
            let origin = resolve_target(&mut binding.target, spec, ctx, matches)
                .map_err(|e| BindingError::flag(&spec.name, e))?;
            tracing::debug!(binding = %spec.name, %origin, "resolved binding");
            provenance.push((spec.name.clone(), origin));
        }
        Ok(provenance)
    }

    /// Register on `command`, parse `args`, then resolve.
    pub fn parse_from<I, T>(
        &mut self,
        ctx: &ConfigContext,
        command: Command,
        args: I,
    ) -> Result<(ArgMatches, Provenance), BindingError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.register(command)?.try_get_matches_from(args)?;
        let provenance = self.resolve(ctx, &matches)?;
        Ok((matches, provenance))
    }
}

/// Register `bindings` on `command`, parse `args` and resolve every destination.
pub fn init_flags<'a, I, T>(
    ctx: &ConfigContext,
    command: Command,
    bindings: Vec<Binding<'a>>,
    args: I,
) -> Result<ArgMatches, BindingError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut binder = ConfigBinder::new(bindings);
    binder.parse_from(ctx, command, args).map(|(matches, _)| matches)
}

fn check_available(command: &Command, spec: &FlagSpec) -> Result<(), FlagError> {
    if spec.name.is_empty() {
        return Err(FlagError::EmptyName);
    }

    // clap adds --help and --version (when a version is set) only at build time.
    let help_enabled = !command.is_disable_help_flag_set();
    let version_enabled = !command.is_disable_version_flag_set()
        && (command.get_version().is_some() || command.get_long_version().is_some());
    let name_taken = (help_enabled && spec.name == "help")
        || (version_enabled && spec.name == "version")
        || command.get_arguments().any(|arg| {
            arg.get_id().as_str() == spec.name || arg.get_long() == Some(spec.name.as_str())
        });
    if name_taken {
        return Err(FlagError::DuplicateName(spec.name.clone()));
    }

    if let Some(short) = spec.shorthand {
        let short_taken = (help_enabled && short == 'h')
            || (version_enabled && short == 'V')
            || command.get_arguments().any(|arg| arg.get_short() == Some(short));
        if short_taken {
            return Err(FlagError::DuplicateShorthand(short));
        }
    }

    Ok(())
}

fn flag_arg(spec: &FlagSpec, target: &Target<'_>, default_text: Option<&str>) -> Arg {
    let mut arg = spec.arg();
    if let Some(text) = default_text {
        let help = if spec.usage.is_empty() {
            format!("[default: {text}]")
        } else {
            format!("{} [default: {text}]", spec.usage)
        };
        arg = arg.help(help);
    }

    let self_override = spec.name.clone();
    match target {
        Target::Text(_) => arg
            .value_name("TEXT")
            .action(ArgAction::Set)
            .overrides_with(self_override),
        Target::Bool(_) => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .value_parser(BoolishValueParser::new())
            .action(ArgAction::Set)
            .overrides_with(self_override),
        Target::Int(_) => arg
            .value_name("INT")
            .value_parser(value_parser!(i64))
            .action(ArgAction::Set)
            .overrides_with(self_override),
        Target::Duration(_) => arg
            .value_name("DURATION")
            .value_parser(decode::parse_duration)
            .action(ArgAction::Set)
            .overrides_with(self_override),
        Target::List(_) => arg
            .value_name("LIST")
            .value_parser(parse_list_flag)
            .action(ArgAction::Append),
        Target::Map(_) => arg
            .value_name("KEY=VALUE")
            .value_parser(parse_map_flag)
            .action(ArgAction::Append),
        // Custom targets register themselves.
        Target::Custom(_) => arg,
    }
}

fn parse_list_flag(raw: &str) -> Result<Vec<String>, String> {
    decode::decode_list(raw).ok_or_else(|| format!("expected a comma-separated list, got '{raw}'"))
}

fn parse_map_flag(raw: &str) -> Result<StringMap, String> {
    decode::decode_map(raw)
        .ok_or_else(|| format!("expected key=value or a JSON object, got '{raw}'"))
}

fn resolve_target(
    target: &mut Target<'_>,
    spec: &FlagSpec,
    ctx: &ConfigContext,
    matches: &ArgMatches,
) -> Result<ValueOrigin, FlagError> {
    let name = spec.name.as_str();
    let origin = match target {
        Target::Text(slot) => {
            let flag = flag_one::<String>(matches, name)?;
            resolve_slot(slot, name, ctx, flag, |raw| Some(raw.to_string()), decode::scalar_to_string)
        }
        Target::Bool(slot) => {
            let flag = flag_one::<bool>(matches, name)?;
            resolve_slot(slot, name, ctx, flag, decode::parse_bool, decode::value_to_bool)
        }
        Target::Int(slot) => {
            let flag = flag_one::<i64>(matches, name)?;
            resolve_slot(slot, name, ctx, flag, decode::parse_int, decode::value_to_int)
        }
        Target::Duration(slot) => {
            let flag = flag_one::<Duration>(matches, name)?;
            resolve_slot(
                slot,
                name,
                ctx,
                flag,
                |raw| decode::parse_duration(raw).ok(),
                decode::value_to_duration,
            )
        }
        Target::List(slot) => {
            let flag = flag_many::<Vec<String>>(matches, name)?
                .map(|occurrences| occurrences.into_iter().flatten().collect());
            resolve_slot(slot, name, ctx, flag, decode::decode_list, decode::value_to_list)
        }
        Target::Map(slot) => {
            let flag = flag_many::<StringMap>(matches, name)?
                .map(|occurrences| occurrences.into_iter().flatten().collect());
            resolve_slot(slot, name, ctx, flag, decode::decode_map, decode::value_to_map)
        }
        Target::Custom(resolver) => resolver.resolve(ctx, matches, spec)?,
    };
    Ok(origin)
}

/// Write the highest-precedence value into the slot.
///
/// A present but undecodable env or source value stops the search and leaves
/// the default in place.
fn resolve_slot<T, E, S>(
    slot: &mut Slot<'_, T>,
    name: &str,
    ctx: &ConfigContext,
    flag: Option<T>,
    from_env: E,
    from_source: S,
) -> ValueOrigin
where
    T: Clone + Default,
    E: Fn(&str) -> Option<T>,
    S: Fn(&Value) -> Option<T>,
{
    slot.reset();

    if let Some(value) = flag {
        *slot.dest = value;
        return ValueOrigin::Flag;
    }

    if let Some(raw) = ctx.lookup_env(name) {
        return match from_env(&raw) {
            Some(value) => {
                *slot.dest = value;
                ValueOrigin::Env
            }
            None => {
                tracing::warn!(
                    "Ignoring undecodable value for {} in {}",
                    name,
                    ctx.env_key(name)
                );
                ValueOrigin::Default
            }
        };
    }

    if let Some(value) = ctx.lookup_source(name) {
        return match from_source(&value) {
            Some(decoded) => {
                *slot.dest = decoded;
                ValueOrigin::Source
            }
            None => {
                tracing::warn!("Ignoring undecodable config value for {}: {}", name, value);
                ValueOrigin::Default
            }
        };
    }

    ValueOrigin::Default
}

fn given_on_command_line(matches: &ArgMatches, name: &str) -> Result<bool, MatchesError> {
    Ok(matches.try_contains_id(name)?
        && matches.value_source(name) == Some(ValueSource::CommandLine))
}

fn flag_one<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, FlagError>
where
    T: std::any::Any + Clone + Send + Sync + 'static,
{
    if !given_on_command_line(matches, name)? {
        return Ok(None);
    }
    Ok(matches.try_get_one::<T>(name)?.cloned())
}

fn flag_many<T>(matches: &ArgMatches, name: &str) -> Result<Option<Vec<T>>, FlagError>
where
    T: std::any::Any + Clone + Send + Sync + 'static,
{
    if !given_on_command_line(matches, name)? {
        return Ok(None);
    }
    Ok(matches.try_get_many::<T>(name)?.map(|values| values.cloned().collect()))
}
