//! Lookup listings rendered as plain-text tables.
//!
//! The table is drawn with ratatui widgets into an off-screen buffer and the
//! buffer is then flattened to text, so listings can be printed to a
//! non-interactive stdout and piped.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Padding, Row, Table, Widget},
};
use slotwatch_types::LookupEntry;

/// Printed instead of a table when a lookup returns nothing.
pub const NO_RESULTS: &str = "No results have found for given criteria";

/// Spaces between the id and name columns.
const COLUMN_SPACING: u16 = 3;

/// Render `entries` as a two-column table headed `"<kind> ID"` and
/// `"<kind> name"`, e.g. `"city ID | city name"`.
pub fn render(kind: &str, entries: &[LookupEntry]) -> String {
    if entries.is_empty() {
        return NO_RESULTS.to_string();
    }

    let id_header = format!("{} ID", kind);
    let name_header = format!("{} name", kind);

    let id_width = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .chain([text_width(&id_header)])
        .max()
        .unwrap_or_default();
    let name_width = entries
        .iter()
        .map(|e| text_width(&e.name))
        .chain([text_width(&name_header)])
        .max()
        .unwrap_or_default();

    let rows: Vec<Row> = entries
        .iter()
        .map(|e| Row::new(vec![e.id.to_string(), e.name.clone()]))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(to_u16(id_width)),
            Constraint::Length(to_u16(name_width)),
        ],
    )
    .header(Row::new(vec![id_header, name_header]).bottom_margin(1))
    .column_spacing(COLUMN_SPACING)
    .block(Block::bordered().padding(Padding::horizontal(1)));

    // Borders, padding and spacing around the two columns
    let width = id_width + name_width + usize::from(COLUMN_SPACING) + 4;
    // Borders, header and its margin
    let height = entries.len() + 4;
    let area = Rect::new(0, 0, to_u16(width), to_u16(height));

    let mut buffer = Buffer::empty(area);
    table.render(area, &mut buffer);

    buffer_to_text(&buffer)
}

fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol()))
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_width(text: &str) -> usize {
    Line::from(text).width()
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing() {
        assert_eq!(render("city", &[]), NO_RESULTS);
    }

    #[test]
    fn test_table_lists_entries_in_order() {
        let entries = vec![
            LookupEntry::new(5, "Warszawa"),
            LookupEntry::new(1, "Krakow"),
        ];

        let text = render("city", &entries);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), entries.len() + 4);
        assert!(lines[1].contains("city ID"));
        assert!(lines[1].contains("city name"));
        assert!(lines[3].contains('5') && lines[3].contains("Warszawa"));
        assert!(lines[4].contains('1') && lines[4].contains("Krakow"));
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let name = "Centrum Medyczne Aleje Jerozolimskie 65/79";
        let text = render("clinic", &[LookupEntry::new(123456, name)]);

        assert!(text.contains(name));
        assert!(text.contains("123456"));
    }

    #[test]
    fn test_rows_share_a_width() {
        let entries = vec![
            LookupEntry::new(1, "A"),
            LookupEntry::new(4502, "Internista"),
        ];

        let text = render("service", &entries);
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();

        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
