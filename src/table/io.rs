//! CSV import and export using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields,
//! escaped quotes, and custom delimiters. Every imported row is data: no
//! record is treated as a header, and none is written on export.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::model::TableModel;
use super::source::{display_name, read_source, SourceError};

/// Supported CSV delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Delimiter for a single character, if supported
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            ';' => Some(Delimiter::Semicolon),
            _ => None,
        }
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }

    /// Delimiter implied by a path's extension, if it has a known one
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "csv" | "tsv" | "psv" => Some(Self::from_extension(ext)),
            _ => None,
        }
    }
}

/// Error type for CSV parsing
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "CSV parse error at line {}: {}", line, self.message),
            None => write!(f, "CSV parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Why an import failed. The current table is never touched on failure.
#[derive(Debug, Clone)]
pub enum ImportError {
    /// The file could not be read as text
    Source(SourceError),
    /// The content is not valid CSV
    Parse(ParseError),
}

impl ImportError {
    /// Get a user-friendly error message
    pub fn user_message(&self, path: &Path) -> String {
        let filename = display_name(path);
        match self {
            Self::Source(e) => e.user_message(&filename),
            Self::Parse(e) => format!("Failed to open {}: {}", filename, e),
        }
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(e) => write!(f, "{}", e),
            Self::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ImportError {}

/// Why an export failed. A failed export leaves the target file untouched.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
}

impl ExportError {
    /// Get a user-friendly error message
    pub fn user_message(&self, path: &Path) -> String {
        format!("Failed to save {}: {}", display_name(path), self)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parse CSV content into a table
///
/// Uses the csv crate for RFC 4180 compliant parsing. Ragged rows are padded.
pub fn parse_csv(content: &str, delimiter: Delimiter) -> Result<TableModel, ParseError> {
    let cursor = Cursor::new(content.as_bytes());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(cursor);

    let mut rows: Vec<Vec<String>> = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                rows.push(row);
            }
            Err(e) => {
                return Err(ParseError {
                    message: e.to_string(),
                    line: Some(line_num + 1),
                });
            }
        }
    }

    Ok(TableModel::from_rows(rows))
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Read and parse a CSV file
///
/// When `delimiter` is `None` it is taken from the extension, falling back
/// to sniffing the content.
pub fn import(path: &Path, delimiter: Option<Delimiter>) -> Result<TableModel, ImportError> {
    import_with_delimiter(path, delimiter).map(|(table, _)| table)
}

/// Like [`import`], also returning the delimiter that was used
pub fn import_with_delimiter(
    path: &Path,
    delimiter: Option<Delimiter>,
) -> Result<(TableModel, Delimiter), ImportError> {
    let content = read_source(path).map_err(ImportError::Source)?;

    let delimiter = delimiter
        .or_else(|| Delimiter::for_path(path))
        .unwrap_or_else(|| detect_delimiter(&content));

    let table = parse_csv(&content, delimiter).map_err(ImportError::Parse)?;
    tracing::info!(
        "Imported {} ({} rows x {} columns, {:?})",
        path.display(),
        table.row_count(),
        table.column_count(),
        delimiter
    );
    Ok((table, delimiter))
}

fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Drop leading/trailing rows and columns made only of blank cells
///
/// Interior blank rows and columns are kept.
pub fn trim_empty_edges(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let Some(first_row) = rows.iter().position(|r| !r.iter().all(|c| is_blank(c))) else {
        return Vec::new();
    };
    let last_row = rows
        .iter()
        .rposition(|r| !r.iter().all(|c| is_blank(c)))
        .unwrap_or(first_row);
    let kept = &rows[first_row..=last_row];

    let width = kept.iter().map(Vec::len).max().unwrap_or(0);
    let column_blank = |col: usize| {
        kept.iter()
            .all(|r| r.get(col).map(|c| is_blank(c)).unwrap_or(true))
    };
    let first_col = (0..width).find(|&c| !column_blank(c)).unwrap_or(0);
    let last_col = (0..width).rev().find(|&c| !column_blank(c)).unwrap_or(0);

    kept.iter()
        .map(|r| {
            (first_col..=last_col)
                .map(|c| r.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Serialize a table to CSV bytes, trimming blank edges first
pub fn serialize(table: &TableModel, delimiter: Delimiter) -> Result<Vec<u8>, ExportError> {
    let rows = trim_empty_edges(table.rows());
    let mut out = Vec::new();
    let mut rest = rows.as_slice();

    // An unquoted leading U+FEFF is read back as a byte order mark
    if let Some((first, tail)) = rows.split_first() {
        if first.first().is_some_and(|cell| cell.starts_with('\u{feff}')) {
            let mut writer = csv_writer(delimiter, csv::QuoteStyle::Always, &mut out);
            writer.write_record(first)?;
            writer.flush()?;
            rest = tail;
        }
    }

    let mut writer = csv_writer(delimiter, csv::QuoteStyle::Necessary, &mut out);
    for row in rest {
        writer.write_record(row)?;
    }
    writer.flush()?;
    drop(writer);

    Ok(out)
}

fn csv_writer<W: std::io::Write>(
    delimiter: Delimiter,
    quote_style: csv::QuoteStyle,
    sink: W,
) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .quote_style(quote_style)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink)
}

/// Write a table to `path`
///
/// The content goes to a sibling temporary file first and is renamed over
/// the target, so a failure never leaves a half-written file behind.
pub fn export(table: &TableModel, path: &Path, delimiter: Delimiter) -> Result<(), ExportError> {
    let bytes = serialize(table, delimiter)?;
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, &bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".whisk-tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple_csv() {
        let content = "a,b,c\n1,2,3\n";
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.get(0, 0), Ok("a"));
        assert_eq!(table.get(1, 2), Ok("3"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = r#""hello, world","test"
"with ""quotes""","normal"
"#;
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.get(0, 0), Ok("hello, world"));
        assert_eq!(table.get(1, 0), Ok("with \"quotes\""));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let content = "a,b,c\n1,2\n";
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.get(1, 2), Ok(""));
    }

    #[test]
    fn test_parse_empty() {
        let table = parse_csv("", Delimiter::Comma).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n"), Delimiter::Comma);
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3\n"), Delimiter::Tab);
        assert_eq!(detect_delimiter("a|b|c\n1|2|3\n"), Delimiter::Pipe);
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n"), Delimiter::Semicolon);
        assert_eq!(detect_delimiter("plain"), Delimiter::Comma);
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(Delimiter::from_extension("csv"), Delimiter::Comma);
        assert_eq!(Delimiter::from_extension("TSV"), Delimiter::Tab);
        assert_eq!(Delimiter::for_path(Path::new("x.psv")), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::for_path(Path::new("x.txt")), None);
    }

    #[test]
    fn test_trim_empty_edges() {
        let rows = vec![
            strings(&["", "", "", ""]),
            strings(&["", "a", "", ""]),
            strings(&["", "  ", "", ""]),
            strings(&["", "b", "", "c"]),
            strings(&[" ", "", "", ""]),
        ];
        let trimmed = trim_empty_edges(&rows);

        assert_eq!(
            trimmed,
            vec![
                strings(&["a", "", ""]),
                strings(&["  ", "", ""]),
                strings(&["b", "", "c"]),
            ]
        );
    }

    #[test]
    fn test_trim_all_blank() {
        let rows = vec![strings(&["", " "]), strings(&["\t", ""])];
        assert!(trim_empty_edges(&rows).is_empty());
        assert!(trim_empty_edges(&[]).is_empty());
    }

    #[test]
    fn test_serialize_has_no_header_and_trims() {
        let table = TableModel::from_rows(vec![
            strings(&["x", "y", ""]),
            strings(&["1", "2", ""]),
            strings(&["", "", ""]),
        ]);
        let bytes = serialize(&table, Delimiter::Comma).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "x,y\n1,2\n");
    }

    #[test]
    fn test_serialize_quotes_when_needed() {
        let table = TableModel::from_rows(vec![strings(&["a,b", "say \"hi\""])]);
        let bytes = serialize(&table, Delimiter::Comma).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\"a,b\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_serialize_quotes_leading_bom_cell() {
        let table = TableModel::from_rows(vec![
            strings(&["\u{feff}id", "name"]),
            strings(&["\u{feff}1", "a"]),
        ]);
        let bytes = serialize(&table, Delimiter::Comma).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "\"\u{feff}id\",\"name\"\n\u{feff}1,a\n");

        let reparsed = parse_csv(&text, Delimiter::Comma).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_import_and_export_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.tsv");
        std::fs::write(&path, "a\tb\n1\t2\n").unwrap();

        let table = import(&path, None).unwrap();
        assert_eq!(table.get(1, 1), Ok("2"));

        let out = dir.path().join("out.csv");
        export(&table, &out, Delimiter::Comma).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "a,b\n1,2\n");
        assert!(!temp_path_for(&out).exists());
    }

    #[test]
    fn test_import_missing_file() {
        let result = import(Path::new("/nonexistent/whisk/data.csv"), None);
        assert!(matches!(
            result,
            Err(ImportError::Source(SourceError::NotFound))
        ));
    }

    #[test]
    fn test_import_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.csv");
        std::fs::write(&path, b"a,b\x00c").unwrap();

        assert!(matches!(
            import(&path, None),
            Err(ImportError::Source(SourceError::Binary { offset: 3 }))
        ));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let table = TableModel::from_rows(vec![strings(&["a"])]);
        let path = Path::new("/nonexistent/whisk/out.csv");
        assert!(export(&table, path, Delimiter::Comma).is_err());
    }
}
