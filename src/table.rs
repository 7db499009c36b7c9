//! CSV loading and plain-text rendering for the analyze-data command.
//!
//! The API consumes a textual rendering of the data, so fidelity matters more
//! than prettiness: every cell appears verbatim, columns are padded for
//! alignment.

use anyhow::{Context, Result};
use std::path::Path;

/// A CSV file held in memory as strings.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a CSV file. The first record is treated as the header row.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to parse CSV header: {}", path.display()))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .with_context(|| format!("Failed to parse CSV record: {}", path.display()))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Render as aligned plain text, one line per row.
    pub fn render(&self) -> String {
        let columns = self
            .headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0));

        let mut widths = vec![0usize; columns];
        for (i, header) in self.headers.iter().enumerate() {
            widths[i] = widths[i].max(header.chars().count());
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_line(&self.headers, &widths));
        for row in &self.rows {
            lines.push(render_line(row, &widths));
        }
        lines.join("\n")
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        for _ in cell.chars().count()..*width {
            line.push(' ');
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table_from(csv_text: &str) -> Table {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv_text.as_bytes()).unwrap();
        Table::from_csv_path(file.path()).unwrap()
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let table = table_from("name,score\nalice,10\nbob,3\n");
        assert_eq!(table.headers, vec!["name", "score"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["bob", "3"]);
    }

    #[test]
    fn test_render_aligns_columns() {
        let table = table_from("name,score\nalice,10\nbob,3\n");
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["name   score", "alice  10", "bob    3"]);
    }

    #[test]
    fn test_render_handles_ragged_rows() {
        let table = table_from("a,b\n1\n2,3\n");
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1");
        assert_eq!(lines[2], "2  3");
    }

    #[test]
    fn test_header_only_file() {
        let table = table_from("x,y\n");
        assert_eq!(table.render(), "x  y");
    }
}
