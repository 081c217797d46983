//! RFC 4180 style CSV output.

use std::borrow::Cow;
use std::io::Write;

use crate::error::ExportError;
use crate::report::ReportTable;

/// Quote a cell when it contains a delimiter, quote or line break; embedded
/// quotes are doubled.
pub fn escape(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn write_record<W: Write>(out: &mut W, cells: &[String]) -> std::io::Result<()> {
    let line: Vec<Cow<'_, str>> = cells.iter().map(|c| escape(c)).collect();
    out.write_all(line.join(",").as_bytes())?;
    out.write_all(b"\r\n")
}

/// Header row followed by data rows. Title and footer lines are not part of
/// the CSV.
pub fn write<W: Write>(table: &ReportTable, mut out: W) -> Result<(), ExportError> {
    write_record(&mut out, &table.headers)?;
    for row in &table.rows {
        write_record(&mut out, row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn render(table: &ReportTable) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(table, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("Ali, Sons"), "\"Ali, Sons\"");
        assert_eq!(escape("5\" pipe"), "\"5\"\" pipe\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn renders_header_and_rows() {
        let mut table = ReportTable::new("Clients", ["Name", "Phone"]);
        table.push_row(vec!["Ali, Traders".into(), "0300".into()]);
        table.push_row(vec!["Bilal".into(), String::new()]);
        assert_eq!(
            render(&table),
            "Name,Phone\r\n\"Ali, Traders\",0300\r\nBilal,\r\n"
        );
    }

    #[test]
    fn writes_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.csv");
        let table = ReportTable::new("Clients", ["Name"]);
        write(&table, std::fs::File::create(&path).unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Name\r\n");
    }
}
