//! Combines the datasets of one axis slot into a long-format table.

use crate::dataset::{Dataset, RowValue};
use crate::{DataError, DataResult};

/// Scale/offset applied to one axis slot.
///
/// `index := index / x_scale + x_offset`, `value := value / y_scale + y_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    pub x_scale: f64,
    pub x_offset: f64,
    pub y_scale: f64,
    pub y_offset: f64,
    /// When false, tuple rows pass through unscaled. Scalars are always
    /// transformed.
    pub apply_to_components: bool,
}

impl Default for AxisTransform {
    fn default() -> Self {
        Self {
            x_scale: 1.0,
            x_offset: 0.0,
            y_scale: 1.0,
            y_offset: 0.0,
            apply_to_components: true,
        }
    }
}

impl AxisTransform {
    pub fn index(&self, row: usize) -> f64 {
        row as f64 / self.x_scale + self.x_offset
    }

    pub fn value(&self, value: &RowValue) -> RowValue {
        if value.is_tuple() && !self.apply_to_components {
            return value.clone();
        }
        value.map(|v| v / self.y_scale + self.y_offset)
    }
}

/// One observation: `(index, variable, value)`. `value` is `None` where a
/// series is shorter than the longest one or has no moving average yet.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub index: f64,
    pub variable: String,
    pub value: Option<RowValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    records: Vec<LongRecord>,
}

impl LongTable {
    pub fn records(&self) -> &[LongRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Variable names in first-seen order.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.variable.as_str()) {
                names.push(&record.variable);
            }
        }
        names
    }

    /// Defined points of one variable.
    pub fn points<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = (f64, &'a RowValue)> + 'a {
        self.records
            .iter()
            .filter(move |r| r.variable == variable)
            .filter_map(|r| r.value.as_ref().map(|v| (r.index, v)))
    }

    /// Smallest and largest index over all records.
    pub fn index_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.index).fold(None, |acc, i| match acc {
            None => Some((i, i)),
            Some((lo, hi)) => Some((lo.min(i), hi.max(i))),
        })
    }
}

struct Series {
    name: String,
    values: Vec<Option<RowValue>>,
}

/// Gathers the datasets of one axis slot, then aligns them by row position
/// and reshapes them into a [`LongTable`].
#[derive(Debug, Clone, Default)]
pub struct DatasetFrameBuilder {
    transform: AxisTransform,
    moving_average: Option<usize>,
    datasets: Vec<Dataset>,
}

impl DatasetFrameBuilder {
    pub fn new(transform: AxisTransform) -> Self {
        Self {
            transform,
            ..Default::default()
        }
    }

    /// Adds a moving-average series right after each dataset's own series.
    pub fn with_moving_average(mut self, window: Option<usize>) -> Self {
        self.moving_average = window;
        self
    }

    pub fn push(&mut self, dataset: Dataset) {
        self.datasets.push(dataset);
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn build(mut self) -> DataResult<LongTable> {
        if self.moving_average == Some(0) {
            return Err(DataError::InvalidWindow { window: 0 });
        }

        let mut series: Vec<Series> = Vec::with_capacity(self.datasets.len() * 2);
        for ds in &mut self.datasets {
            series.push(Series {
                name: ds.display_name().to_string(),
                values: ds.rows().iter().cloned().map(Some).collect(),
            });
            if let Some(window) = self.moving_average {
                let name = ds.display_name().to_string();
                let avg = ds.compute_moving_average(window)?;
                series.push(Series {
                    name: avg.series_name(&name),
                    values: avg.values.iter().map(|v| v.map(RowValue::Scalar)).collect(),
                });
            }
        }

        let rows = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
        let mut records = Vec::with_capacity(rows * series.len());
        for s in &series {
            for row in 0..rows {
                let value = s.values.get(row).cloned().flatten();
                records.push(LongRecord {
                    index: self.transform.index(row),
                    variable: s.name.clone(),
                    value: value.map(|v| self.transform.value(&v)),
                });
            }
        }
        tracing::debug!(series = series.len(), rows, "built long table");
        Ok(LongTable { records })
    }
}
