use csv::ReaderBuilder;
use ndarray::{s, Array2};
use std::fs::File;
use std::path::Path;

use crate::error::{invalid, Result};

/// Represents a numerical dataset loaded from a TSV file
#[derive(Debug, Clone)]
pub struct DataSet {
    pub data: Array2<f64>,
    pub headers: Option<Vec<String>>,
}

impl DataSet {
    /// Read a headered TSV file, one point per line.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        Self::from_reader(file, &path.as_ref().display().to_string())
    }

    /// Same as [`DataSet::from_tsv`] for any reader; `source` only names it in errors.
    pub fn from_reader<R: std::io::Read>(reader: R, source: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .ok()
            .map(|h| h.iter().map(|s| s.to_string()).collect::<Vec<_>>());

        let mut records: Vec<Vec<f64>> = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let row = record
                .iter()
                .map(|x| {
                    x.trim().parse::<f64>().or_else(|_| {
                        invalid(format!("{source}: record {i} has non-numeric field {x:?}"))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            records.push(row);
        }

        if records.is_empty() {
            return invalid(format!("no data lines found in {source}"));
        }

        let nrows = records.len();
        let ncols = records[0].len();
        let flat: Vec<f64> = records.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((nrows, ncols), flat)?;

        Ok(Self { data, headers })
    }

    /// Get a view of the first N columns (for clustering)
    pub fn numeric_view(&self, ncols: usize) -> Array2<f64> {
        let cols = usize::min(ncols, self.data.ncols());
        self.data.slice(s![.., 0..cols]).to_owned()
    }
}
