//! Delimited-text catalogs (CSV, TSV, semicolon-separated).
//!
//! The first non-blank line is the header. Columns are located by header
//! name, so their order in the file does not matter. Any malformed row
//! fails the whole parse; a partial catalog would understate non-compliance.

use super::entry::CatalogEntry;

/// Header spellings accepted for each catalog column, compared after
/// lowercasing and removing `_`, `-` and spaces.
const NAME_HEADERS: &[&str] = &["softwarename", "name", "software"];
const VERSION_HEADERS: &[&str] = &["version", "expectedversion"];
const APPROVED_HEADERS: &[&str] = &["approved"];
const RESTRICTION_HEADERS: &[&str] = &["restrictedto", "restriction", "restricted"];

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    name: usize,
    version: usize,
    approved: usize,
    restriction: Option<usize>,
}

/// Pick the field delimiter from the header line.
pub fn detect_delimiter(header: &str) -> char {
    if header.contains('\t') {
        '\t'
    } else if header.contains(';') && !header.contains(',') {
        ';'
    } else {
        ','
    }
}

/// Split one record, honoring double-quoted fields and `""` escapes.
pub fn split_record(line: &str, delimiter: char) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.trim().is_empty() {
            field.clear();
            in_quotes = true;
        } else if c == delimiter {
            fields.push(field.trim().to_string());
            field.clear();
        } else {
            field.push(c);
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field.trim().to_string());
    Ok(fields)
}

/// Parse a boolean approval cell.
pub fn parse_approved(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_column(headers: &[String], accepted: &[&str]) -> Option<usize> {
    headers.iter().position(|h| accepted.contains(&h.as_str()))
}

fn resolve_columns(headers: &[String]) -> Result<Columns, String> {
    let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let required = |accepted: &[&str], label: &str| {
        find_column(&headers, accepted).ok_or_else(|| format!("header is missing a {} column", label))
    };

    Ok(Columns {
        name: required(NAME_HEADERS, "software name")?,
        version: required(VERSION_HEADERS, "version")?,
        approved: required(APPROVED_HEADERS, "approved")?,
        restriction: find_column(&headers, RESTRICTION_HEADERS),
    })
}

/// Parse delimited text into catalog entries.
///
/// Errors carry the 1-based line number of the offending row.
pub fn parse_delimited(content: &str) -> Result<Vec<CatalogEntry>, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_index, header_line)) = lines.next() else {
        return Err("file is empty".to_string());
    };

    let delimiter = detect_delimiter(header_line);
    let headers = split_record(header_line, delimiter)
        .map_err(|e| format!("line {}: {}", header_index + 1, e))?;
    let columns = resolve_columns(&headers)?;

    let mut entries = Vec::new();
    for (index, line) in lines {
        let line_no = index + 1;
        let fields = split_record(line, delimiter).map_err(|e| format!("line {}: {}", line_no, e))?;

        if fields.len() != headers.len() {
            return Err(format!(
                "line {}: expected {} fields, found {}",
                line_no,
                headers.len(),
                fields.len()
            ));
        }

        let approved_cell = &fields[columns.approved];
        let approved = parse_approved(approved_cell).ok_or_else(|| {
            format!(
                "line {}: invalid approved value '{}'",
                line_no, approved_cell
            )
        })?;

        let name = &fields[columns.name];
        if name.is_empty() {
            return Err(format!("line {}: software name is empty", line_no));
        }

        entries.push(CatalogEntry::new(
            name.as_str(),
            fields[columns.version].as_str(),
            approved,
            columns.restriction.map(|i| fields[i].as_str()),
        ));
    }

    Ok(entries)
}
