//! Datasets: one ingested data file plus its optional moving average.

use crate::{DataError, DataResult};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Signed decimal token as it appears in fixed-width `.dat` output.
const DAT_TOKEN_PATTERN: &str = r"-?\d+\.?\d*";

/// One row of a dataset: a single value, or several when the file has more
/// than one value column (scatter and phase-plot data).
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    Scalar(f64),
    Tuple(Vec<f64>),
}

impl RowValue {
    /// One value becomes a scalar, anything else a tuple.
    pub fn from_values(mut values: Vec<f64>) -> Self {
        if values.len() == 1 {
            RowValue::Scalar(values.remove(0))
        } else {
            RowValue::Tuple(values)
        }
    }

    pub fn components(&self) -> &[f64] {
        match self {
            RowValue::Scalar(v) => std::slice::from_ref(v),
            RowValue::Tuple(values) => values,
        }
    }

    pub fn component(&self, index: usize) -> Option<f64> {
        self.components().get(index).copied()
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            RowValue::Scalar(v) => Some(*v),
            RowValue::Tuple(_) => None,
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, RowValue::Tuple(_))
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> RowValue {
        match self {
            RowValue::Scalar(v) => RowValue::Scalar(f(*v)),
            RowValue::Tuple(values) => RowValue::Tuple(values.iter().map(|v| f(*v)).collect()),
        }
    }
}

/// Supported on-disk layouts, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Tsv,
    Dat,
}

impl DataFormat {
    /// Extension match is case-sensitive: `data.CSV` is not a csv file.
    pub fn from_path(path: &Path) -> DataResult<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".csv") {
            Ok(DataFormat::Csv)
        } else if name.ends_with(".tsv") {
            Ok(DataFormat::Tsv)
        } else if name.ends_with(".dat") {
            Ok(DataFormat::Dat)
        } else {
            Err(DataError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    pub window: usize,
    /// Same length as the source rows; `None` until a full window exists.
    pub values: Vec<Option<f64>>,
}

impl MovingAverage {
    pub fn series_name(&self, dataset: &str) -> String {
        format!("{dataset} {} Frame Mov. Avg.", self.window)
    }
}

/// Trailing mean over `window` samples. Entries before the first full
/// window are `None`.
pub fn moving_average(series: &[f64], window: usize) -> DataResult<Vec<Option<f64>>> {
    if window == 0 {
        return Err(DataError::InvalidWindow { window });
    }
    Ok((0..series.len())
        .map(|i| {
            (i + 1 >= window).then(|| {
                let slice = &series[i + 1 - window..=i];
                slice.iter().sum::<f64>() / window as f64
            })
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    display_name: String,
    source_path: PathBuf,
    rows: Vec<RowValue>,
    moving_average: Option<MovingAverage>,
}

impl Dataset {
    pub fn new(display_name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            source_path: source_path.into(),
            rows: Vec::new(),
            moving_average: None,
        }
    }

    /// In-memory dataset with no backing file.
    pub fn from_rows(display_name: impl Into<String>, rows: Vec<RowValue>) -> Self {
        Self {
            rows,
            ..Self::new(display_name, PathBuf::new())
        }
    }

    /// Opens and parses `path` in one step.
    pub fn read(display_name: impl Into<String>, path: impl Into<PathBuf>) -> DataResult<Self> {
        let mut dataset = Self::new(display_name, path);
        dataset.populate()?;
        Ok(dataset)
    }

    /// Replaces the rows with the contents of the source file. On error the
    /// dataset is left untouched.
    pub fn populate(&mut self) -> DataResult<()> {
        let format = DataFormat::from_path(&self.source_path)?;
        if !self.source_path.is_file() {
            return Err(DataError::NotFound {
                path: self.source_path.clone(),
            });
        }
        tracing::debug!(path = %self.source_path.display(), ?format, "begin reading");
        let rows = match format {
            DataFormat::Csv => read_delimited(&self.source_path, b',')?,
            DataFormat::Tsv => read_delimited(&self.source_path, b'\t')?,
            DataFormat::Dat => read_dat(&self.source_path)?,
        };
        tracing::debug!(path = %self.source_path.display(), rows = rows.len(), "end reading");
        self.rows = rows;
        self.moving_average = None;
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn rows(&self) -> &[RowValue] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn moving_average(&self) -> Option<&MovingAverage> {
        self.moving_average.as_ref()
    }

    /// Computes and stores the trailing moving average. Only scalar rows can
    /// be averaged.
    pub fn compute_moving_average(&mut self, window: usize) -> DataResult<&MovingAverage> {
        let series = self
            .rows
            .iter()
            .map(RowValue::as_scalar)
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| DataError::UnsupportedCombination {
                dataset: self.display_name.clone(),
                reason: "a moving average needs single-value rows".to_string(),
            })?;
        let values = moving_average(&series, window)?;
        tracing::debug!(dataset = %self.display_name, window, "computed moving average");
        Ok(&*self.moving_average.insert(MovingAverage { window, values }))
    }
}

fn parse_cells<'a>(
    cells: impl Iterator<Item = &'a str>,
    path: &Path,
    line: u64,
) -> DataResult<Vec<f64>> {
    cells
        .map(|cell| {
            cell.trim().parse::<f64>().map_err(|_| DataError::Parse {
                path: path.to_path_buf(),
                line,
                cell: cell.to_string(),
            })
        })
        .collect()
}

/// Header row discarded; the first column of every record is the row index
/// and is dropped.
fn read_delimited(path: &Path, delimiter: u8) -> DataResult<Vec<RowValue>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() <= 1 {
            tracing::warn!(path = %path.display(), line, "skipping record without value columns");
            continue;
        }
        let values = parse_cells(record.iter().skip(1), path, line)?;
        rows.push(RowValue::from_values(values));
    }
    Ok(rows)
}

/// Fixed-width numeric output: header line, then an index token followed by
/// one or more values per line, separated by any amount of whitespace.
fn read_dat(path: &Path) -> DataResult<Vec<RowValue>> {
    let tokens = Regex::new(DAT_TOKEN_PATTERN)?;
    let reader = BufReader::new(File::open(path)?);

    let mut rows = Vec::new();
    for (number, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line_no = number as u64 + 1;
        let values = parse_cells(tokens.find_iter(&line).map(|m| m.as_str()), path, line_no)?;
        match values.len() {
            0 => continue,
            1 => {
                tracing::warn!(path = %path.display(), line = line_no, "skipping line with only an index");
            }
            _ => rows.push(RowValue::from_values(values[1..].to_vec())),
        }
    }
    Ok(rows)
}
