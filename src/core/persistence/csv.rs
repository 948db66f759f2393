//! Minimal CSV reader/writer for the registrar's tabular files
//!
//! Fields are comma separated. A field is quoted when it contains a comma, a quote
//! or a line break, with inner quotes doubled. Quoted fields may span lines.

/// A parsed CSV record together with the line it started on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// Line number of the record's first character
    pub line: usize,
    /// Field values with quoting removed
    pub fields: Vec<String>,
}

impl CsvRecord {
    /// Whether the record is a blank line
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    /// Re-encode the record as a single CSV line, for diagnostics
    #[must_use]
    pub fn to_line(&self) -> String {
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        format_record(&fields)
    }
}

/// Column lookup built from a header record
#[derive(Debug, Clone)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Build a header from the first record of a file
    #[must_use]
    pub fn new(record: &CsvRecord) -> Self {
        Self {
            columns: record.fields.iter().map(|f| f.trim().to_string()).collect(),
        }
    }

    /// Get a field from `record` by column name (case-insensitive)
    ///
    /// Values come back exactly as stored, surrounding whitespace included.
    #[must_use]
    pub fn field<'a>(&self, record: &'a CsvRecord, name: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .and_then(|idx| record.fields.get(idx))
            .map(String::as_str)
    }

    /// Like [`field`](Self::field) but reports a missing column as an error message
    ///
    /// # Errors
    /// Returns a description naming the missing column
    pub fn require<'a>(&self, record: &'a CsvRecord, name: &str) -> Result<&'a str, String> {
        self.field(record, name)
            .ok_or_else(|| format!("missing '{name}' column"))
    }
}

/// Split CSV text into records
///
/// Never fails: an unterminated quote simply runs to the end of the input.
#[must_use]
pub fn parse_records(content: &str) -> Vec<CsvRecord> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(CsvRecord {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(CsvRecord {
            line: record_line,
            fields,
        });
    }

    records
}

/// Quote a single field if needed
#[must_use]
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Encode one record (without trailing newline)
#[must_use]
pub fn format_record(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode a float the way it should appear in a data file (`4.0`, not `4`)
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}
