use std::path::Path;

use seatswap::{Board, ShowDate, TicketRequest};
use serde::Serialize;
use tracing::instrument;

use super::{OutputFormat, card, terminal::Colorize};

#[derive(Debug, Default, clap::Parser)]
pub struct Command {
    /// Only show postings for this date (03/07 or 03/08)
    #[arg(long, short)]
    date: Option<ShowDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// A posting as shown in the pool. Contacts are never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PoolEntry<'a> {
    id: &'a str,
    date: ShowDate,
    have_area: &'a str,
    have_row: &'a str,
    want_area: &'a str,
    want_row: &'a str,
}

impl<'a> From<&'a TicketRequest> for PoolEntry<'a> {
    fn from(request: &'a TicketRequest) -> Self {
        Self {
            id: request.id().as_str(),
            date: request.date(),
            have_area: &request.have().area,
            have_row: &request.have().row,
            want_area: &request.want().area,
            want_row: &request.want().row,
        }
    }
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let board = Board::at(root);
        let entries = self.select(&board);

        match self.output {
            OutputFormat::Json => {
                let entries: Vec<PoolEntry> = entries.into_iter().map(PoolEntry::from).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    println!("No one is waiting for a swap right now.");
                    return Ok(());
                }
                println!("{}", format!("{} waiting", entries.len()).accent());
                for request in entries {
                    println!();
                    println!("{}", card::render(request, false));
                }
            }
        }

        Ok(())
    }

    fn select<'a, S: seatswap::RecordStore>(&self, board: &'a Board<S>) -> Vec<&'a TicketRequest> {
        board
            .open_requests()
            .filter(|r| self.date.is_none_or(|date| r.date() == date))
            .collect()
    }
}
