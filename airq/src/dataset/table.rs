use super::Cell;
use std::collections::HashMap;

/// an uploaded tabular dataset: a header row and equally-sized rows of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// builds a dataset, renaming repeated headers `name`, `name.1`, `name.2`, ...
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Dataset, String> {
        if headers.is_empty() {
            return Err(String::from("no columns to parse from file"));
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(format!(
                "row {idx} has {} fields, expected {}",
                row.len(),
                headers.len()
            ));
        }
        let mut seen: HashMap<String, usize> = HashMap::new();
        let headers = headers
            .into_iter()
            .map(|h| {
                let count = seen.entry(h.clone()).or_insert(0);
                let name = if *count == 0 {
                    h
                } else {
                    format!("{h}.{count}")
                };
                *count += 1;
                name
            })
            .collect();
        Ok(Dataset { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// the first `n` rows
    pub fn head(&self, n: usize) -> &[Vec<Cell>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// number of missing cells in each column, in column order
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(j, h)| {
                let count = self.rows.iter().filter(|row| row[j].is_missing()).count();
                (h.clone(), count)
            })
            .collect()
    }

    /// values of a column if every non-missing cell is numeric, with `None`
    /// for missing cells. returns `None` for columns holding any text.
    pub fn numeric_column(&self, idx: usize) -> Option<Vec<Option<f64>>> {
        self.rows
            .iter()
            .map(|row| {
                let cell = &row[idx];
                if cell.is_missing() {
                    Some(None)
                } else {
                    cell.as_f64().map(Some)
                }
            })
            .collect()
    }

    /// non-missing values of a numeric column, looked up by name
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        let column = self.numeric_column(idx)?;
        Some(column.into_iter().flatten().collect())
    }

    /// names and values of every numeric column
    pub fn numeric_columns(&self) -> Vec<(String, Vec<Option<f64>>)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(j, h)| self.numeric_column(j).map(|col| (h.clone(), col)))
            .collect()
    }
}
