//! CSV tables in and out, via polars.
//!
//! Inputs are read eagerly through the lazy CSV reader; integer columns are
//! cast to `Float64` so hand-written files like `lon,lat\n0,0` work. Angle
//! columns are converted to radians here when the caller asks for degrees,
//! which is the only unit conversion on the whole path into the kernels.

use anyhow::{Context, Result};
use geodetic::api::radians;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct Table {
    df: DataFrame,
    degrees: bool,
}

impl Table {
    pub fn read(path: &Path, degrees: bool) -> Result<Self> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("opening {}", path.display()))?
            .collect()
            .with_context(|| format!("reading {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            rows = df.height(),
            cols = df.width(),
            "input_csv_shape"
        );
        Ok(Self { df, degrees })
    }

    pub fn rows(&self) -> usize {
        self.df.height()
    }

    /// A plain numeric column (depths, planar coordinates).
    pub fn floats(&self, name: &str) -> Result<Vec<f64>> {
        let series = self
            .df
            .column(name)
            .with_context(|| format!("missing column `{name}`"))?
            .cast(&DataType::Float64)?;
        let values: Option<Vec<f64>> = series.f64()?.into_iter().collect();
        values.with_context(|| format!("column `{name}` has null entries"))
    }

    /// A column holding an angle, returned in radians.
    pub fn angles(&self, name: &str) -> Result<Vec<f64>> {
        let values = self.floats(name)?;
        Ok(if self.degrees { radians(&values) } else { values })
    }

    pub fn optional_floats(&self, name: &str) -> Result<Option<Vec<f64>>> {
        if self.df.column(name).is_err() {
            return Ok(None);
        }
        self.floats(name).map(Some)
    }
}

/// Render radians back into the unit the inputs were given in.
pub fn output_angles(values: Vec<f64>, degrees: bool) -> Vec<f64> {
    if degrees {
        values.into_iter().map(f64::to_degrees).collect()
    } else {
        values
    }
}

pub fn float_series(name: &str, values: &[f64]) -> Series {
    Series::new(name.into(), values)
}

pub fn index_series(name: &str, values: &[i64]) -> Series {
    Series::new(name.into(), values)
}

/// Row numbers for the query table, so outputs can be joined back.
pub fn row_series(rows: usize) -> Series {
    let ids: Vec<i64> = (0..rows as i64).collect();
    index_series("row", &ids)
}

/// Write `columns` as CSV to `out`, or to stdout when no path is given.
pub fn write(columns: Vec<Series>, out: Option<&Path>) -> Result<()> {
    let mut df = DataFrame::new(columns)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
            tracing::info!(path = %path.display(), rows = df.height(), "output_csv");
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            CsvWriter::new(&mut lock)
                .include_header(true)
                .finish(&mut df)?;
            lock.flush()?;
        }
    }
    Ok(())
}
