//! Renders a parsed directory as CSV or JSON

use crate::error::Result;
use crate::table::{ColumnOrder, Directory, Entry};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One header row plus one row per entry
    #[default]
    Csv,
    /// Pretty-printed array of entry objects
    Json,
}

/// How CSV fields are quoted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quoting {
    /// Wrap every present field in `"` with no escaping; absent fields are left empty
    #[default]
    Legacy,
    /// Quote and escape only where RFC 4180 requires it
    Rfc4180,
}

/// Options controlling how a directory is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub format: OutputFormat,
    pub quoting: Quoting,
    pub column_order: ColumnOrder,
}

/// Write a directory to `writer` using the given options
pub fn write_directory<W: Write>(dir: &Directory, options: &WriteOptions, writer: W) -> Result<()> {
    match options.format {
        OutputFormat::Csv => {
            let columns = dir.attributes.columns(options.column_order);
            match options.quoting {
                Quoting::Legacy => write_legacy(dir, &columns, writer),
                Quoting::Rfc4180 => write_rfc4180(dir, &columns, writer),
            }
        }
        OutputFormat::Json => write_json(dir, writer),
    }
}

/// Render a directory into a string
pub fn render(dir: &Directory, options: &WriteOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_directory(dir, options, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_legacy<W: Write>(dir: &Directory, columns: &[&str], mut writer: W) -> Result<()> {
    let header: Vec<String> = columns.iter().map(|name| quote(name)).collect();
    writeln!(writer, "{}", header.join(","))?;

    for entry in &dir.entries {
        let values: Vec<String> = columns
            .iter()
            .map(|name| entry.get(name).map(quote).unwrap_or_default())
            .collect();
        writeln!(writer, "{}", values.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_rfc4180<W: Write>(dir: &Directory, columns: &[&str], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(columns)?;
    for entry in &dir.entries {
        csv_writer.write_record(row(entry, columns))?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(dir: &Directory, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &dir.entries)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn row<'a>(entry: &'a Entry, columns: &[&str]) -> Vec<&'a str> {
    columns
        .iter()
        .map(|name| entry.get(name).unwrap_or(""))
        .collect()
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const SAMPLE: &str = "\
dn: uid=jdoe,dc=example
cn: John Doe
dn: uid=asmith,dc=example
cn: Ann Smith
mail: a@example.com
";

    fn csv(content: &str) -> String {
        render(&parse_str(content), &WriteOptions::default()).unwrap()
    }

    #[test]
    fn test_legacy_csv_output() {
        assert_eq!(
            csv(SAMPLE),
            "\"dn\",\"cn\",\"mail\"\n\
             \"uid=jdoe,dc=example\",\"John Doe\",\n\
             \"uid=asmith,dc=example\",\"Ann Smith\",\"a@example.com\"\n"
        );
    }

    #[test]
    fn test_row_count_matches_entries() {
        let dir = parse_str(SAMPLE);
        let out = render(&dir, &WriteOptions::default()).unwrap();

        assert_eq!(out.lines().count(), 1 + dir.entry_count());
    }

    #[test]
    fn test_header_and_rows_share_column_order() {
        let out = csv("dn: a\nmail: m\ndn: b\ncn: c\n");
        let mut lines = out.lines();

        assert_eq!(lines.next(), Some("\"dn\",\"mail\",\"cn\""));
        assert_eq!(lines.next(), Some("\"a\",\"m\","));
        assert_eq!(lines.next(), Some("\"b\",,\"c\""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_no_dn_emits_empty_header_and_row() {
        // A single empty trailing entry still produces a row
        assert_eq!(csv("cn: orphan\n"), "\n\n");
    }

    #[test]
    fn test_legacy_does_not_escape() {
        let out = csv("dn: cn=a\ndescription: say \"hi\", then leave\n");
        assert!(out.ends_with("\"cn=a\",\"say \"hi\", then leave\"\n"));
    }

    #[test]
    fn test_empty_value_is_quoted() {
        let out = csv("dn: a\ncn: \ndn: b\nmail: m\n");
        assert!(out.contains("\"a\",\"\",\n"));
        assert!(out.contains("\"b\",,\"m\"\n"));
    }

    #[test]
    fn test_sorted_column_order() {
        let options = WriteOptions {
            column_order: ColumnOrder::Sorted,
            ..Default::default()
        };
        let out = render(&parse_str(SAMPLE), &options).unwrap();

        assert!(out.starts_with("\"cn\",\"dn\",\"mail\"\n\"John Doe\",\"uid=jdoe,dc=example\",\n"));
    }

    #[test]
    fn test_rfc4180_escapes_fields() {
        let options = WriteOptions {
            quoting: Quoting::Rfc4180,
            ..Default::default()
        };
        let out = render(
            &parse_str("dn: cn=a,dc=x\ndescription: say \"hi\"\ndn: cn=b\n"),
            &options,
        )
        .unwrap();

        assert_eq!(
            out,
            "dn,description\n\"cn=a,dc=x\",\"say \"\"hi\"\"\"\ncn=b,\n"
        );
    }

    #[test]
    fn test_json_output() {
        let options = WriteOptions {
            format: OutputFormat::Json,
            ..Default::default()
        };
        let out = render(&parse_str(SAMPLE), &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["cn"], "John Doe");
        assert_eq!(entries[1]["mail"], "a@example.com");
        assert!(entries[0].get("mail").is_none());
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = csv(SAMPLE);
        let second = csv(SAMPLE);
        assert_eq!(first, second);
    }
}
