//! Text rendering of a single posting.

use seatswap::{Seat, TicketRequest};

use super::terminal::{Colorize, is_narrow};

/// Number of id characters shown. Commands accept any unique prefix.
const SHORT_ID: usize = 8;

/// Placeholder for a contact handle that has not been revealed.
const HIDDEN_CONTACT: &str = "visible after match";

pub fn short_id(request: &TicketRequest) -> &str {
    let id = request.id().as_str();
    id.char_indices().nth(SHORT_ID).map_or(id, |(end, _)| &id[..end])
}

fn seat(seat: &Seat) -> String {
    format!("{} row {}", seat.area.trim(), seat.row.trim())
}

/// Renders a posting as a card.
///
/// The contact handle is only printed when `show_contact` is set.
pub fn render(request: &TicketRequest, show_contact: bool) -> String {
    if is_narrow() {
        return render_line(request, show_contact);
    }

    let status = if request.is_matched() {
        "MATCHED".success()
    } else {
        "EXCHANGE OPEN".to_string()
    };
    let contact = if show_contact {
        request.contact().to_string()
    } else {
        HIDDEN_CONTACT.dim()
    };

    format!(
        "{}  {status}  {}\n  HAVE  {}\n  WANT  {}\n  Contact: {contact}",
        request.date().label().accent(),
        short_id(request).dim(),
        seat(request.have()).accent(),
        seat(request.want()).accent(),
    )
}

/// Compact single-line form used on narrow terminals.
pub fn render_line(request: &TicketRequest, show_contact: bool) -> String {
    let mark = if request.is_matched() { "✔" } else { "·" };
    let mut line = format!(
        "{mark} {} {} {}/{} → {}/{}",
        short_id(request),
        request.date().short(),
        request.have().area.trim(),
        request.have().row.trim(),
        request.want().area.trim(),
        request.want().row.trim(),
    );
    if show_contact {
        line.push(' ');
        line.push_str(request.contact());
    }
    line
}
