use crate::model::entry::Entry;
use crate::util::unicode::{display_width, pad_center, pad_left, pad_right};

const HEADERS: [&str; 4] = ["TASK", "DATE", "TAGS", "PRIORITY"];

/// Priority is the only right-aligned column
const RIGHT_ALIGNED: [bool; 4] = [false, false, false, true];

/// How `render_table` lays out rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Boxed table with a header row and a rule after every row (`list`)
    WithHeader,
    /// One bare line per entry, no header or borders (selector feed)
    Borderless,
}

/// Render entries as aligned table lines.
///
/// In `Borderless` style line `i` is always entry `i`; `delete` relies on
/// that to map the selected line back to a position in the store.
pub fn render_table(entries: &[Entry], style: TableStyle) -> Vec<String> {
    let rows: Vec<[String; 4]> = entries.iter().map(entry_cells).collect();

    let mut widths = [0usize; 4];
    if style == TableStyle::WithHeader {
        for (w, h) in widths.iter_mut().zip(HEADERS) {
            *w = display_width(h);
        }
    }
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    match style {
        TableStyle::WithHeader => boxed(&rows, &widths),
        TableStyle::Borderless => rows
            .iter()
            .map(|row| {
                aligned(row, &widths)
                    .join(" | ")
                    .trim_end()
                    .to_string()
            })
            .collect(),
    }
}

fn entry_cells(entry: &Entry) -> [String; 4] {
    [
        entry.task.clone(),
        entry.date_str(),
        entry.tags_str(),
        entry.priority.to_string(),
    ]
}

fn aligned(row: &[String; 4], widths: &[usize; 4]) -> Vec<String> {
    row.iter()
        .zip(widths)
        .zip(RIGHT_ALIGNED)
        .map(|((cell, &w), right)| {
            if right {
                pad_left(cell, w)
            } else {
                pad_right(cell, w)
            }
        })
        .collect()
}

fn boxed(rows: &[[String; 4]], widths: &[usize; 4]) -> Vec<String> {
    let rule = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let framed = |cells: Vec<String>| format!("| {} |", cells.join(" | "));

    let mut lines = Vec::with_capacity(rows.len() * 2 + 3);
    lines.push(rule.clone());
    lines.push(framed(
        HEADERS
            .iter()
            .zip(widths)
            .map(|(h, &w)| pad_center(h, w))
            .collect(),
    ));
    lines.push(rule.clone());
    for row in rows {
        lines.push(framed(aligned(row, widths)));
        lines.push(rule.clone());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn entry(task: &str, (y, m, d): (i32, u32, u32), tags: &[&str], priority: i64) -> Entry {
        let mut e = Entry::new(task.into(), NaiveDate::from_ymd_opt(y, m, d).unwrap());
        e.tags = tags.iter().map(|t| t.to_string()).collect();
        e.priority = priority;
        e
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("pay rent", (2024, 4, 1), &[], 5),
            entry("buy milk", (2024, 3, 1), &["errand", "home"], 2),
        ]
    }

    #[test]
    fn test_with_header_layout() {
        let lines = render_table(&sample(), TableStyle::WithHeader);
        assert_eq!(
            lines.join("\n"),
            "\
+----------+----------+-------------+----------+
|   TASK   |   DATE   |    TAGS     | PRIORITY |
+----------+----------+-------------+----------+
| pay rent | 2024/4/1 |             |        5 |
+----------+----------+-------------+----------+
| buy milk | 2024/3/1 | errand,home |        2 |
+----------+----------+-------------+----------+"
        );
    }

    #[test]
    fn test_empty_with_header_has_no_rows() {
        let lines = render_table(&[], TableStyle::WithHeader);
        assert_eq!(
            lines,
            vec![
                "+------+------+------+----------+",
                "| TASK | DATE | TAGS | PRIORITY |",
                "+------+------+------+----------+",
            ]
        );
    }

    #[test]
    fn test_borderless_layout() {
        let lines = render_table(&sample(), TableStyle::Borderless);
        assert_eq!(
            lines,
            vec![
                "pay rent | 2024/4/1 |             | 5",
                "buy milk | 2024/3/1 | errand,home | 2",
            ]
        );
    }

    #[test]
    fn test_borderless_empty() {
        assert!(render_table(&[], TableStyle::Borderless).is_empty());
    }

    #[test]
    fn test_borderless_one_line_per_entry_in_order() {
        let entries = vec![
            entry("b", (2024, 1, 1), &[], 1),
            entry("a", (2024, 1, 1), &[], 1),
            entry("b", (2024, 1, 1), &[], 1),
        ];
        let lines = render_table(&entries, TableStyle::Borderless);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("b "));
        assert!(lines[1].starts_with("a "));
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn test_wide_characters_align() {
        let entries = vec![
            entry("牛乳", (2024, 1, 1), &[], 1),
            entry("milk", (2024, 1, 1), &[], 10),
        ];
        let lines = render_table(&entries, TableStyle::Borderless);
        assert_eq!(lines[0], "牛乳 | 2024/1/1 |  |  1");
        assert_eq!(lines[1], "milk | 2024/1/1 |  | 10");
    }
}
