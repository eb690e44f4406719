//! cmdkit: inspect config resolution and run the bundled text and URL helpers

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
