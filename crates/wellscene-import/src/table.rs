use crate::ImportError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Comma separated, double quotes group fields.
    Comma,
    /// Runs of spaces or tabs.
    Whitespace,
}

#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line number in the source file.
    pub line: usize,
    pub fields: Vec<String>,
}

/// A header row plus data rows, all as text.
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    header: Vec<String>,
    rows: Vec<Row>,
}

pub fn read_table(path: &Path, delimiter: Delimiter) -> Result<Table, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(path, &text, delimiter)
}

pub fn parse_table(path: &Path, text: &str, delimiter: Delimiter) -> Result<Table, ImportError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_start_matches('\u{feff}')))
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(ImportError::Empty {
            path: path.to_path_buf(),
        });
    };
    let header = split_fields(header_line, delimiter);

    let rows = lines
        .map(|(line, l)| Row {
            line,
            fields: split_fields(l, delimiter),
        })
        .collect();

    Ok(Table {
        path: path.to_path_buf(),
        header,
        rows,
    })
}

impl Table {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a required column.
    pub fn column(&self, name: &str) -> Result<Column, ImportError> {
        self.header
            .iter()
            .position(|h| h == name)
            .map(|index| Column {
                index,
                name: name.to_string(),
            })
            .ok_or_else(|| ImportError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    pub fn text<'a>(&self, row: &'a Row, col: &Column) -> Result<&'a str, ImportError> {
        row.fields
            .get(col.index)
            .map(String::as_str)
            .ok_or_else(|| ImportError::ShortRow {
                path: self.path.clone(),
                line: row.line,
                expected: self.header.len(),
                found: row.fields.len(),
            })
    }

    /// Floating-point cell. Empty cells read as NaN.
    pub fn f64(&self, row: &Row, col: &Column) -> Result<f64, ImportError> {
        let raw = self.text(row, col)?;
        if raw.is_empty() {
            return Ok(f64::NAN);
        }
        raw.parse::<f64>().map_err(|_| self.bad_number(row, col, raw))
    }

    /// Integer cell; integral floats such as `3.0` are accepted and an empty
    /// cell reads as `None`.
    pub fn opt_i64(&self, row: &Row, col: &Column) -> Result<Option<i64>, ImportError> {
        let raw = self.text(row, col)?;
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(Some(v));
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
            _ => Err(self.bad_number(row, col, raw)),
        }
    }

    fn bad_number(&self, row: &Row, col: &Column, raw: &str) -> ImportError {
        ImportError::BadNumber {
            path: self.path.clone(),
            line: row.line,
            column: col.name.clone(),
            value: raw.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        Delimiter::Comma => split_quoted(line)
            .into_iter()
            .map(|f| f.trim().to_string())
            .collect(),
    }
}

/// Splits on commas outside double quotes; `""` inside quotes is a literal
/// quote.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
