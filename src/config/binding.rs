//! Declarative bindings from a setting name to a caller-owned destination

use super::context::ConfigContext;
use super::decode::StringMap;
use super::error::FlagError;
use clap::{Arg, ArgMatches, Command};
use std::fmt;
use std::time::Duration;

/// Flag-facing metadata of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Dot-delimited setting name, also used as the long flag.
    pub name: String,
    pub shorthand: Option<char>,
    pub usage: String,
}

impl FlagSpec {
    /// Base clap argument: id and long flag from the name, short and help text.
    pub fn arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone()).long(self.name.clone()).help(self.usage.clone());
        if let Some(short) = self.shorthand {
            arg = arg.short(short);
        }
        arg
    }
}

/// Which layer supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueOrigin {
    Default,
    Source,
    Env,
    Flag,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueOrigin::Default => "default",
            ValueOrigin::Source => "config",
            ValueOrigin::Env => "env",
            ValueOrigin::Flag => "flag",
        };
        f.write_str(label)
    }
}

/// Resolution strategy for settings the built-in kinds cannot express.
pub trait Resolver {
    /// Register the flag for this binding. Defaults to a plain text flag.
    fn register(&self, command: Command, spec: &FlagSpec) -> Result<Command, FlagError> {
        Ok(command.arg(spec.arg().value_name("TEXT")))
    }

    /// Write the final value into the resolver's destination.
    fn resolve(
        &mut self,
        ctx: &ConfigContext,
        matches: &ArgMatches,
        spec: &FlagSpec,
    ) -> Result<ValueOrigin, FlagError>;
}

/// Destination handle plus its declared default.
pub struct Slot<'a, T> {
    pub(crate) dest: &'a mut T,
    pub(crate) default: Option<T>,
}

impl<T: Clone + Default> Slot<'_, T> {
    pub(crate) fn reset(&mut self) {
        *self.dest = self.default.clone().unwrap_or_default();
    }
}

/// The closed set of destination kinds a binding can write into.
pub enum Target<'a> {
    Text(Slot<'a, String>),
    Bool(Slot<'a, bool>),
    Int(Slot<'a, i64>),
    Duration(Slot<'a, Duration>),
    List(Slot<'a, Vec<String>>),
    Map(Slot<'a, StringMap>),
    Custom(Box<dyn Resolver + 'a>),
}

/// Types a [`Binding`] can write into directly.
pub trait Bindable: Clone + Default + Sized + 'static {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_>;

    /// Human-readable form used in `--help` defaults.
    fn render(&self) -> String;
}

impl Bindable for String {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_> {
        Target::Text(slot)
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl Bindable for bool {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_> {
        Target::Bool(slot)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Bindable for i64 {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_> {
        Target::Int(slot)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Bindable for Duration {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_> {
        Target::Duration(slot)
    }

    fn render(&self) -> String {
        humantime::format_duration(*self).to_string()
    }
}

impl Bindable for Vec<String> {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_> {
        Target::List(slot)
    }

    fn render(&self) -> String {
        self.join(",")
    }
}

impl Bindable for StringMap {
    fn into_target(slot: Slot<'_, Self>) -> Target<'_> {
        Target::Map(slot)
    }

    fn render(&self) -> String {
        self.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(",")
    }
}

/// One configurable value: name, flag metadata and destination.
pub struct Binding<'a> {
    pub(crate) spec: FlagSpec,
    pub(crate) target: Target<'a>,
    pub(crate) default_text: Option<String>,
}

impl<'a> Binding<'a> {
    /// Bind `name` to `dest`; with no default the type's zero value is used.
    pub fn new<T: Bindable>(name: impl Into<String>, dest: &'a mut T) -> Self {
        Self::from_slot(name.into(), Slot { dest, default: None })
    }

    pub fn with_default<T: Bindable>(name: impl Into<String>, dest: &'a mut T, default: T) -> Self {
        let default_text = default.render();
        let mut binding = Self::from_slot(name.into(), Slot { dest, default: Some(default) });
        binding.default_text = Some(default_text);
        binding
    }

    pub fn custom<R: Resolver + 'a>(name: impl Into<String>, resolver: R) -> Self {
        Self {
            spec: FlagSpec { name: name.into(), shorthand: None, usage: String::new() },
            target: Target::Custom(Box::new(resolver)),
            default_text: None,
        }
    }

    fn from_slot<T: Bindable>(name: String, slot: Slot<'a, T>) -> Self {
        Self {
            spec: FlagSpec { name, shorthand: None, usage: String::new() },
            target: T::into_target(slot),
            default_text: None,
        }
    }

    /// One-character short alias for the flag.
    pub fn short(mut self, shorthand: char) -> Self {
        self.spec.shorthand = Some(shorthand);
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.spec.usage = usage.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &FlagSpec {
        &self.spec
    }
}
