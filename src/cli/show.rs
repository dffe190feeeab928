use std::path::Path;

use seatswap::{Board, RequestId, ShowDate, TicketRequest};
use serde::Serialize;
use tracing::instrument;

use super::{OutputFormat, card, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The id of the posting, or a unique prefix of it
    id: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// A posting as shown on its own. The contact is only present once matched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowEntry<'a> {
    id: &'a str,
    created_at: i64,
    date: ShowDate,
    have_area: &'a str,
    have_row: &'a str,
    want_area: &'a str,
    want_row: &'a str,
    is_matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_with_id: Option<&'a RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<&'a str>,
}

impl<'a> From<&'a TicketRequest> for ShowEntry<'a> {
    fn from(request: &'a TicketRequest) -> Self {
        Self {
            id: request.id().as_str(),
            created_at: request.created().timestamp_millis(),
            date: request.date(),
            have_area: &request.have().area,
            have_row: &request.have().row,
            want_area: &request.want().area,
            want_row: &request.want().row,
            is_matched: request.is_matched(),
            matched_with_id: request.matched_with(),
            contact: request.is_matched().then(|| request.contact()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ShowView<'a> {
    request: ShowEntry<'a>,
    counterpart: Option<ShowEntry<'a>>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let board = Board::at(root);
        let request = board.resolve(&self.id)?;
        let counterpart = board.counterpart_of(request);

        let output = match self.output {
            OutputFormat::Json => json(request, counterpart)?,
            OutputFormat::Table => table(request, counterpart),
        };
        println!("{output}");

        Ok(())
    }
}

fn json(
    request: &TicketRequest,
    counterpart: Option<&TicketRequest>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ShowView {
        request: request.into(),
        counterpart: counterpart.map(ShowEntry::from),
    })
}

fn table(request: &TicketRequest, counterpart: Option<&TicketRequest>) -> String {
    let mut lines = vec![
        request.id().as_str().dim(),
        card::render(request, request.is_matched()),
        format!(
            "  {}",
            format!("Posted {}", request.created().format("%Y-%m-%d %H:%M UTC")).dim()
        ),
    ];

    match (request.matched_with(), counterpart) {
        (Some(_), Some(counterpart)) => {
            lines.push(String::new());
            lines.push("Matched with:".success());
            lines.push(card::render(counterpart, true));
        }
        (Some(id), None) => {
            lines.push(String::new());
            lines.push(format!("Matched with {id}, which has since been deleted").warning());
        }
        (None, _) => {}
    }

    lines.join("\n")
}
