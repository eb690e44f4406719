//! Flag, environment and config-source binding
//!
//! Binds declared settings into caller-owned variables with precedence
//! (Flag > Env > Config source > Default), resolved per binding.

pub mod binder;
pub mod binding;
pub mod context;
pub mod decode;
pub mod error;
pub mod loader;

pub use binder::{init_flags, ConfigBinder, Provenance};
pub use binding::{Bindable, Binding, FlagSpec, Resolver, Slot, Target, ValueOrigin};
pub use context::ConfigContext;
pub use decode::StringMap;
pub use error::{BindingError, FlagError, SourceError};
pub use loader::{load_config, Format};
