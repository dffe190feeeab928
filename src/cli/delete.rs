use std::path::Path;

use seatswap::Board;
use tracing::instrument;

use super::{card, prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the posting, or a unique prefix of it
    id: String,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut board = Board::at(root);
        let request = board.resolve(&self.id)?;
        let id = request.id().clone();

        if !self.yes {
            println!("Will delete:");
            println!("{}", card::render(request, true));
            if request.is_matched() {
                println!(
                    "\n{}",
                    "Its counterpart will stay marked as matched.".warning()
                );
            }
            prompt_to_proceed()?;
        }

        if board.delete(&id).is_none() {
            anyhow::bail!("no posting with id '{id}'");
        }

        println!("{}", format!("✅ Deleted {id}").success());
        Ok(())
    }
}
