//! Terminal and file output.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use tradedesk_export::{csv, html, pdf, PrintTemplate, ReportTable};

use crate::commands::ExportFormat;

const MAX_CELL: usize = 32;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL {
        cell.to_string()
    } else {
        let mut out: String = cell.chars().take(MAX_CELL - 3).collect();
        out.push_str("...");
        out
    }
}

/// Align a report as plain text: title, lines, header, rule, rows, footer.
pub fn render_text(table: &ReportTable) -> String {
    let headers: Vec<String> = table.headers.iter().map(|h| clip(h)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| clip(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", table.title);
    for text in &table.lines {
        let _ = writeln!(out, "{text}");
    }
    if rows.is_empty() {
        let _ = writeln!(out, "No records found.");
    } else {
        let _ = writeln!(out, "{}", line(&headers));
        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        let _ = writeln!(out, "{}", "-".repeat(total));
        for row in &rows {
            let _ = writeln!(out, "{}", line(row));
        }
    }
    for text in &table.footer {
        let _ = writeln!(out, "{text}");
    }
    out
}

pub fn print_table(table: &ReportTable) {
    print!("{}", render_text(table));
}

/// Render `table` in `format` and write it to `output` (or `{stem}.{ext}`).
pub fn write_export(
    table: &ReportTable,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{}.{}", table.file_stem(), format.extension())),
    };
    let bytes = match format {
        ExportFormat::Csv => csv::render(table).into_bytes(),
        ExportFormat::Pdf => pdf::render(table)?,
        ExportFormat::Html => html::render_print(table, &PrintTemplate::default()).into_bytes(),
    };
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Exported {} rows to {}", table.rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportTable {
        let mut table = ReportTable::new("Clients Report", ["Name", "Phone"])
            .with_lines(vec!["Page 1 of 1".to_string()])
            .with_footer(vec!["2 records".to_string()]);
        table.push_row(vec!["Ali Traders".into(), "0300".into()]);
        table.push_row(vec!["B".into(), "0321 5550000".into()]);
        table
    }

    #[test]
    fn text_columns_are_aligned() {
        let text = render_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Clients Report");
        assert_eq!(lines[1], "Page 1 of 1");
        assert_eq!(lines[2], "Name         Phone");
        assert_eq!(lines[4], "Ali Traders  0300");
        assert_eq!(lines[5], "B            0321 5550000");
        assert_eq!(lines[6], "2 records");
    }

    #[test]
    fn empty_tables_say_so() {
        let table = ReportTable::new("Orders Report", ["PO"]);
        assert!(render_text(&table).contains("No records found."));
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(50);
        assert_eq!(clip(&long).chars().count(), MAX_CELL);
        assert!(clip(&long).ends_with("..."));
    }

    #[test]
    fn exports_use_the_title_for_the_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.csv");
        let written = write_export(&sample(), ExportFormat::Csv, Some(&path)).unwrap();
        assert_eq!(written, path);
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with("Name,Phone\r\n"));

        let html_path = dir.path().join("clients.html");
        write_export(&sample(), ExportFormat::Html, Some(&html_path)).unwrap();
        assert!(std::fs::read_to_string(&html_path).unwrap().contains("Ali Traders"));
    }
}
