use std::path::Path;

use seatswap::{Board, RecordStore, TicketRequest};
use tracing::instrument;

use super::{OutputFormat, card, terminal::Colorize};

#[derive(Debug, Default, clap::Parser)]
pub struct Command {
    /// Only show matched postings
    #[arg(long)]
    matched: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let board = Board::at(root);
        let output = match self.output {
            OutputFormat::Json => serde_json::to_string_pretty(&self.select(&board))?,
            OutputFormat::Table => table(&board, &self.select(&board)),
        };
        println!("{output}");

        Ok(())
    }

    fn select<'a, S: RecordStore>(&self, board: &'a Board<S>) -> Vec<&'a TicketRequest> {
        board
            .requests()
            .iter()
            .filter(|r| !self.matched || r.is_matched())
            .collect()
    }
}

fn table<S: RecordStore>(board: &Board<S>, records: &[&TicketRequest]) -> String {
    if records.is_empty() {
        return "No records yet. Post one with 'swap post'.".to_string();
    }

    let matched = records.iter().filter(|r| r.is_matched()).count();
    let mut lines = vec![format!(
        "{} records, {}",
        records.len(),
        format!("{matched} matched").success()
    )];
    for request in records {
        lines.push(String::new());
        lines.push(card::render(request, true));
        if let Some(counterpart) = board.counterpart_of(request) {
            lines.push(format!(
                "  {}",
                format!(
                    "Matched with {} ({})",
                    card::short_id(counterpart),
                    counterpart.contact()
                )
                .success()
            ));
        }
    }
    lines.join("\n")
}
