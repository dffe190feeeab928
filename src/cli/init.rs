use std::{fs, path::Path};

use seatswap::{Config, domain::CONFIG_DIR};
use tracing::instrument;

#[derive(Debug, Default, clap::Parser)]
pub struct Command {
    /// Name of the event being traded
    #[arg(long)]
    event_name: Option<String>,

    /// Venue of the event
    #[arg(long)]
    venue: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let swap_dir = root.join(CONFIG_DIR);
        if swap_dir.exists() {
            anyhow::bail!("Board already initialized (found existing {CONFIG_DIR} directory)");
        }

        fs::create_dir_all(&swap_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {CONFIG_DIR} directory: {e}"))?;

        let mut config = Config::default();
        if let Some(event_name) = self.event_name {
            config.set_event_name(event_name);
        }
        config.set_venue(self.venue);
        config
            .save(&Config::path(root))
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!("Initialized exchange board in {}", root.display());
        println!("  Event:   {}", config.event_name());
        println!("  Created: {CONFIG_DIR}/config.toml");
        println!();
        println!("Next steps:");
        println!(
            "  swap post --date 03/07 --have-area 特B --have-row 10 --want-area 特A --want-row 5 \
             --contact @you"
        );

        Ok(())
    }
}
