use std::{collections::BTreeMap, path::Path};

use seatswap::{Board, Config, RecordStore, ShowDate};
use serde::Serialize;
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, clap::Parser, Default)]
#[command(about = "Show open and matched counts per show date")]
pub struct Command {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
struct Counts {
    open: usize,
    matched: usize,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    venue: Option<&'a str>,
    dates: BTreeMap<&'static str, Counts>,
    total: usize,
}

fn count<S: RecordStore>(board: &Board<S>) -> BTreeMap<&'static str, Counts> {
    let mut counts: BTreeMap<&'static str, Counts> = ShowDate::ALL
        .iter()
        .map(|date| (date.short(), Counts::default()))
        .collect();

    for request in board.requests() {
        let entry = counts.entry(request.date().short()).or_default();
        if request.is_matched() {
            entry.matched += 1;
        } else {
            entry.open += 1;
        }
    }
    counts
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(root);
        let board = Board::at(root);
        let summary = Summary {
            event: config.event_name(),
            venue: config.venue(),
            dates: count(&board),
            total: board.requests().len(),
        };

        let output = match self.output {
            OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
            OutputFormat::Table if self.quiet => quiet(&summary),
            OutputFormat::Table => table(&summary),
        };
        println!("{output}");

        Ok(())
    }
}

/// Tab separated `date open matched` lines.
fn quiet(summary: &Summary<'_>) -> String {
    summary
        .dates
        .iter()
        .map(|(date, counts)| format!("{date}\t{}\t{}", counts.open, counts.matched))
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(summary: &Summary<'_>) -> String {
    let mut lines = vec![summary.event.accent()];
    if let Some(venue) = summary.venue {
        lines.push(venue.dim());
    }
    lines.push(String::new());

    if summary.total == 0 {
        lines.push("No postings yet. Post one with 'swap post'.".to_string());
        return lines.join("\n");
    }

    if is_narrow() {
        for (date, counts) in &summary.dates {
            lines.push(format!("{date}: {} open, {} matched", counts.open, counts.matched));
        }
    } else {
        lines.push(format!("{:<8} {:>6} {:>8}", "Date", "Open", "Matched"));
        for (date, counts) in &summary.dates {
            lines.push(format!(
                "{date:<8} {:>6} {}",
                counts.open,
                format!("{:>8}", counts.matched).success()
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("{} postings in total", summary.total).dim());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use seatswap::{Draft, MemoryStore, Seat};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn counts_split_by_date_and_state() {
        let mut board = Board::open(MemoryStore::new());
        for (date, have, want) in [
            (ShowDate::Mar07, "A", "B"),
            (ShowDate::Mar07, "B", "A"),
            (ShowDate::Mar07, "C", "D"),
            (ShowDate::Mar08, "A", "B"),
        ] {
            board.submit(
                Draft::new(date, Seat::new(have, "1"), Seat::new(want, "1"), "@c").unwrap(),
            );
        }

        let counts = count(&board);

        assert_eq!(counts["03/07"], Counts { open: 1, matched: 2 });
        assert_eq!(counts["03/08"], Counts { open: 1, matched: 0 });
    }

    #[test]
    fn empty_board_lists_every_date() {
        let board = Board::open(MemoryStore::new());
        let counts = count(&board);

        assert_eq!(counts.len(), ShowDate::ALL.len());
        assert!(counts.values().all(|c| *c == Counts::default()));
    }

    fn summary(board: &Board<MemoryStore>) -> Summary<'_> {
        Summary {
            event: "Test Event",
            venue: Some("Test Hall"),
            dates: count(board),
            total: board.requests().len(),
        }
    }

    #[test]
    fn quiet_output_is_tab_separated() {
        let mut board = Board::open(MemoryStore::new());
        board.submit(
            Draft::new(ShowDate::Mar08, Seat::new("A", "1"), Seat::new("B", "1"), "@c").unwrap(),
        );

        assert_eq!(quiet(&summary(&board)), "03/07\t0\t0\n03/08\t1\t0");
    }

    #[test]
    fn table_shows_event_and_totals() {
        let mut board = Board::open(MemoryStore::new());
        assert!(table(&summary(&board)).contains("No postings yet"));

        board.submit(
            Draft::new(ShowDate::Mar07, Seat::new("A", "1"), Seat::new("B", "1"), "@c").unwrap(),
        );
        let text = table(&summary(&board));

        assert!(text.contains("Test Event"));
        assert!(text.contains("Test Hall"));
        assert!(text.contains("1 postings in total"));
    }

    #[test]
    fn json_summary_carries_counts() {
        let board = Board::open(MemoryStore::new());
        let value = serde_json::to_value(summary(&board)).unwrap();

        assert_eq!(value["event"], "Test Event");
        assert_eq!(value["total"], 0);
        assert_eq!(value["dates"]["03/08"]["open"], 0);
    }

    #[test]
    fn status_runs_in_every_format() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();

        Command::default().run(root).unwrap();
        Command {
            output: OutputFormat::Json,
            quiet: false,
        }
        .run(root)
        .unwrap();
        Command {
            output: OutputFormat::Table,
            quiet: true,
        }
        .run(root)
        .unwrap();
    }
}
