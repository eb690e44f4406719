//! show-config command implementation

use anyhow::Result;

use super::Resolved;

pub fn run(resolved: &Resolved) -> Result<()> {
    match &resolved.config_path {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: (none)"),
    }

    for ((name, value), (_, origin)) in resolved.settings.rendered().iter().zip(&resolved.provenance) {
        println!("{name} = {value} ({origin})");
    }
    Ok(())
}
