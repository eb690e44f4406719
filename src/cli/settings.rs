//! Global settings resolved from flags, `CMDKIT_*` variables and the config file

use cmdkit::config::{Bindable, Binding, StringMap};

pub const ENV_PREFIX: &str = "CMDKIT";

/// Config files looked up in the working directory when `--config` is absent.
pub const CONFIG_CANDIDATES: &[&str] = &["cmdkit.yaml", ".cmdkit.yaml", "cmdkit.toml", ".cmdkit.toml"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub log_ansi: bool,
    pub truncate_limit: i64,
    pub expand_params: StringMap,
}

impl Settings {
    /// One binding per setting, borrowing the matching field.
    pub fn bindings(&mut self) -> Vec<Binding<'_>> {
        vec![
            Binding::with_default("log.level", &mut self.log_level, "warn".to_string())
                .usage("Log level when RUST_LOG is unset (error, warn, info, debug, trace)"),
            Binding::with_default("log.ansi", &mut self.log_ansi, true)
                .usage("Colorize log output"),
            Binding::with_default("truncate.limit", &mut self.truncate_limit, 80)
                .usage("Default character limit for `truncate`"),
            Binding::new("expand.params", &mut self.expand_params)
                .usage("Parameters substituted by `expand` (key=value or JSON object)"),
        ]
    }

    /// Setting names with their current values, in binding order.
    pub fn rendered(&self) -> Vec<(&'static str, String)> {
        vec![
            ("log.level", self.log_level.render()),
            ("log.ansi", self.log_ansi.render()),
            ("truncate.limit", self.truncate_limit.render()),
            ("expand.params", self.expand_params.render()),
        ]
    }
}
