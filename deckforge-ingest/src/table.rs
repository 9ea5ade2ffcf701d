//! Parser for line-oriented pseudo-table source text.
//!
//! Source files are markdown-style tables: each data row starts with
//! the `|` delimiter, the header row and `|---` separator runs are
//! skipped by content, and `## ` section headers set a group context
//! that scopes every following row until the next header.

/// Character that opens a data row and delimits its cells.
pub const ROW_DELIMITER: char = '|';

/// Markup prefix for a section-header line.
const GROUP_PREFIX: &str = "##";

/// One parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Trimmed, non-empty cells in column order.
    pub cells: Vec<String>,
    /// Group context in effect for this row, if any section header
    /// preceded it.
    pub group: Option<String>,
    /// 1-based source line number, for skip diagnostics.
    pub line: usize,
}

/// Parse pseudo-table text into data rows.
///
/// `header_label` is the known first-column label of the header row
/// (e.g. "Name"); a row echoing it is skipped. Lines that start with
/// neither the delimiter nor a section-header prefix are ignored, so
/// surrounding prose is harmless. Column-count validation is the
/// builder's concern, not the parser's.
pub fn parse_table(text: &str, header_label: &str) -> Vec<TableRow> {
    let mut rows = Vec::new();
    let mut group: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(heading) = line.strip_prefix(GROUP_PREFIX) {
            let heading = heading.trim_start_matches('#').trim();
            if !heading.is_empty() {
                group = Some(heading.to_string());
            }
            continue;
        }

        if !line.starts_with(ROW_DELIMITER) || is_separator(line) {
            continue;
        }

        let cells: Vec<String> = line
            .split(ROW_DELIMITER)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if cells.is_empty() || cells[0] == header_label {
            continue;
        }

        rows.push(TableRow {
            cells,
            group: group.clone(),
            line: idx + 1,
        });
    }

    rows
}

/// A separator row is a delimiter followed by a dash run: `|---|---|`.
fn is_separator(line: &str) -> bool {
    line.trim_start_matches(ROW_DELIMITER)
        .trim_start()
        .starts_with("---")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
| Name | Energy | Combat |
|------|--------|--------|
| Tarzan | 7 | 8 |
| John Carter | 6 | 7 |
";

    #[test]
    fn skips_header_and_separator() {
        let rows = parse_table(TABLE, "Name");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0], "Tarzan");
        assert_eq!(rows[1].cells[0], "John Carter");
    }

    #[test]
    fn cells_are_trimmed() {
        let rows = parse_table("|  Tarzan  |  7  |", "Name");
        assert_eq!(rows[0].cells, vec!["Tarzan".to_string(), "7".to_string()]);
    }

    #[test]
    fn prose_between_tables_is_ignored() {
        let text = "Some intro text.\n\n| Tarzan | 7 |\nTrailing notes.\n";
        let rows = parse_table(text, "Name");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn group_context_scopes_following_rows() {
        let text = "\
## Barsoom
| Red Planet | 1 |
| Twin Cities | 2 |
## Amtor
| Cloud Veil | 1 |
";
        let rows = parse_table(text, "Mission");
        assert_eq!(rows[0].group.as_deref(), Some("Barsoom"));
        assert_eq!(rows[1].group.as_deref(), Some("Barsoom"));
        assert_eq!(rows[2].group.as_deref(), Some("Amtor"));
    }

    #[test]
    fn rows_before_any_header_have_no_group() {
        let rows = parse_table("| Tarzan | 7 |\n## Later\n| Korak | 5 |", "Name");
        assert_eq!(rows[0].group, None);
        assert_eq!(rows[1].group.as_deref(), Some("Later"));
    }

    #[test]
    fn separator_with_spaces_is_skipped() {
        let rows = parse_table("| --- | --- |\n| Tarzan | 7 |", "Name");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let rows = parse_table(TABLE, "Name");
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[1].line, 4);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_table("", "Name").is_empty());
    }
}
