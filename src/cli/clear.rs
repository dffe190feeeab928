use std::path::Path;

use seatswap::Board;
use tracing::instrument;

use super::{prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut board = Board::at(root);
        let count = board.requests().len();

        if count == 0 {
            println!("Nothing to clear.");
            return Ok(());
        }

        if !self.yes {
            println!(
                "{}",
                format!("This will permanently delete all {count} records on this device.")
                    .warning()
            );
            prompt_to_proceed()?;
        }

        board.clear();
        println!("{}", format!("✅ Cleared {count} records").success());
        Ok(())
    }
}
