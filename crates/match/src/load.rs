use log::warn;

use crate::config::ColumnMapping;
use crate::error::MatchError;
use crate::model::Record;

/// A CSV file held in memory with its original columns, so output can
/// reproduce every input column next to the match results.
#[derive(Debug, Clone)]
pub struct Table {
    /// Label used in error messages, usually the file name.
    pub file: String,
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
    /// Physical line each row starts on, 1-based.
    lines: Vec<u64>,
}

/// Parse CSV text. Header names are trimmed and a leading UTF-8 BOM (as
/// written by Excel) is ignored.
///
/// Short rows are padded with empty cells. A row longer than the header
/// widens the table with unnamed columns so no cell is dropped.
pub fn read_table(file: &str, csv_data: &str) -> Result<Table, MatchError> {
    let data = csv_data.strip_prefix('\u{feff}').unwrap_or(csv_data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_err(file, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_err(file, e))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(rows.len() as u64 + 2);
        if record.len() > headers.len() {
            warn!(
                "{file} line {line}: {} cells but {} headers, adding unnamed columns",
                record.len(),
                headers.len()
            );
            headers.resize(record.len(), String::new());
        }
        rows.push(record.iter().map(|c| c.to_string()).collect());
        lines.push(line);
    }
    for row in &mut rows {
        row.resize(headers.len(), String::new());
    }

    Ok(Table {
        file: file.to_string(),
        headers,
        rows,
        lines,
    })
}

fn csv_err(file: &str, e: csv::Error) -> MatchError {
    MatchError::Csv {
        file: file.to_string(),
        message: e.to_string(),
    }
}

impl Table {
    /// Index of a header, matched exactly (case-sensitive).
    pub fn column(&self, name: &str) -> Result<usize, MatchError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MatchError::MissingColumn {
                file: self.file.clone(),
                column: name.to_string(),
                available: self.headers.join(", "),
            })
    }

    /// Extract records through a column mapping. Every mapped column must
    /// exist, otherwise nothing is returned.
    pub fn records(&self, mapping: &ColumnMapping) -> Result<Vec<Record>, MatchError> {
        let company_idx = self.column(&mapping.company)?;
        let domain_idx = self.column(&mapping.domain)?;
        let email_idx = match mapping.email {
            Some(ref email) => Some(self.column(email)?),
            None => None,
        };

        let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();

        Ok(self
            .rows
            .iter()
            .map(|row| Record {
                company: cell(row, company_idx),
                domain: cell(row, domain_idx),
                email: email_idx.map(|i| cell(row, i)),
            })
            .collect())
    }

    /// 1-based line a data row starts on, counting the header as line 1.
    /// Quoted multi-line cells and blank lines are accounted for.
    pub fn line_of(&self, index: usize) -> u64 {
        self.lines
            .get(index)
            .copied()
            .unwrap_or(index as u64 + 2)
    }
}
