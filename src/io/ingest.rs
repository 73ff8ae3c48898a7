//! Benchmark table ingest.
//!
//! Turns a workbook sheet (or a CSV file) into a [`Dataset`] of the two
//! configured columns.
//!
//! Rules:
//! - the first used row is the header row; names match case-insensitively
//! - reported row numbers are 1-based sheet (or file) rows
//! - numeric cells are used as-is, text cells must parse as numbers
//! - rows whose required cells are all blank are skipped
//! - anything else in a required column aborts the load with the row number

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::domain::{Dataset, InputSpec};
use crate::error::AppError;

/// One cell, reduced to what the loader cares about.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    fn from_text(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Cell::Empty;
        }
        match raw.parse::<f64>() {
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::Float(v) => Cell::Number(*v),
            Data::Int(v) => Cell::Number(*v as f64),
            Data::String(s) => Cell::from_text(s),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// A header row plus data rows tagged with their 1-based sheet row number.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<(usize, Vec<Cell>)>,
}

/// Load the configured columns from the input file.
pub fn load_dataset(input: &InputSpec) -> Result<Dataset, AppError> {
    let (table, source) = if is_csv(&input.path) {
        if input.sheet != crate::domain::DEFAULT_SHEET {
            log::debug!("Sheet name '{}' ignored for CSV input", input.sheet);
        }
        (read_csv_table(&input.path)?, input.path.display().to_string())
    } else {
        (
            read_sheet_table(&input.path, &input.sheet)?,
            format!("{} [{}]", input.path.display(), input.sheet),
        )
    };

    let (nbf, time) = extract_columns(&table, &input.x_column, &input.y_column)?;
    log::info!("Loaded {} rows from {source}", nbf.len());

    Dataset::new(nbf, time, source)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_sheet_table(path: &Path, sheet: &str) -> Result<RawTable, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::new(2, format!("Failed to open workbook '{}': {e}", path.display())))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|name| name == sheet) {
        return Err(AppError::new(
            2,
            format!(
                "Sheet '{sheet}' not found in '{}' (available: {}).",
                path.display(),
                names.join(", ")
            ),
        ));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| AppError::new(2, format!("Failed to read sheet '{sheet}': {e}")))?;

    // Ranges start at the first used cell; keep reported row numbers sheet-relative.
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| AppError::new(3, format!("Sheet '{sheet}' is empty.")))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let rows = rows
        .enumerate()
        .map(|(idx, cells)| (first_row + idx + 2, cells.iter().map(Cell::from).collect()))
        .collect();

    Ok(RawTable { headers, rows })
}

fn read_csv_table(path: &Path) -> Result<RawTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts on line 2 (after the header).
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(3, format!("CSV parse error on line {line}: {e}")))?;
        rows.push((line, record.iter().map(Cell::from_text).collect()));
    }

    Ok(RawTable { headers, rows })
}

fn extract_columns(table: &RawTable, x_column: &str, y_column: &str) -> Result<(Vec<f64>, Vec<f64>), AppError> {
    let header_map = build_header_map(&table.headers);
    let x_idx = column_index(&header_map, x_column)?;
    let y_idx = column_index(&header_map, y_column)?;
    log::debug!("Columns: {x_column}=#{x_idx}, {y_column}=#{y_idx}");

    let mut xs = Vec::with_capacity(table.rows.len());
    let mut ys = Vec::with_capacity(table.rows.len());

    for (line, cells) in &table.rows {
        let x = cells.get(x_idx).cloned().unwrap_or(Cell::Empty);
        let y = cells.get(y_idx).cloned().unwrap_or(Cell::Empty);
        if x == Cell::Empty && y == Cell::Empty {
            continue;
        }
        xs.push(numeric(&x, *line, x_column)?);
        ys.push(numeric(&y, *line, y_column)?);
    }

    if xs.is_empty() {
        return Err(AppError::new(3, "No data rows found below the header."));
    }

    Ok((xs, ys))
}

fn numeric(cell: &Cell, line: usize, column: &str) -> Result<f64, AppError> {
    match cell {
        Cell::Number(v) => Ok(*v),
        Cell::Empty => Err(AppError::new(3, format!("Row {line}: missing value in column `{column}`."))),
        Cell::Text(s) => Err(AppError::new(
            3,
            format!("Row {line}: column `{column}` is not numeric ({s:?})."),
        )),
    }
}

fn column_index(header_map: &HashMap<String, usize>, column: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(column))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{column}`")))
}

fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins, like a spreadsheet lookup.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel-exported CSVs may carry a BOM on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
