use std::path::Path;

use seatswap::{Board, Draft, MatchOutcome, Seat, ShowDate};
use tracing::instrument;

use super::{
    card,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The show date (03/07 or 03/08)
    #[arg(long, short, default_value_t)]
    date: ShowDate,

    /// Area of the seat you hold (e.g. 特B)
    #[arg(long)]
    have_area: String,

    /// Row of the seat you hold (e.g. 10)
    #[arg(long)]
    have_row: String,

    /// Area of the seat you want (e.g. 特A)
    #[arg(long)]
    want_area: String,

    /// Row of the seat you want (e.g. 5)
    #[arg(long)]
    want_row: String,

    /// How the other side can reach you once matched (e.g. an IG handle)
    #[arg(long)]
    contact: String,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let draft = Draft::new(
            self.date,
            Seat::new(self.have_area, self.have_row),
            Seat::new(self.want_area, self.want_row),
            self.contact,
        )?;

        let mut board = Board::at(root);
        let outcome = board.submit(draft);
        let Some(posted) = board.requests().first() else {
            anyhow::bail!("posting was not recorded");
        };

        match outcome {
            MatchOutcome::Matched { counterpart } => {
                println!("{}", "🎉 Match found!".success());
                println!();
                println!("{}", card::render(posted, true));
                println!();
                println!("Matched with:");
                println!("{}", card::render(&counterpart, true));
            }
            MatchOutcome::Unmatched => {
                println!("Posted {} to the pool.", card::short_id(posted));
                if !is_narrow() {
                    println!(
                        "{}",
                        "You will be matched as soon as someone posts the opposite swap.".dim()
                    );
                }
            }
        }

        println!();
        println!(
            "{}",
            "Only swap in person on the day. Never pay anyone in advance.".warning()
        );

        Ok(())
    }
}
