//! Tabular input: one shared x column and an ordered set of y columns.

use crate::error::{Error, Result};

/// A named y column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, if any.
    pub name: Option<String>,
    /// Values, one per x value.
    pub values: Vec<f64>,
}

/// Ordered y columns sharing one x column.
///
/// Every column has exactly as many values as the x column.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    x: Vec<f64>,
    columns: Vec<Column>,
}

impl SeriesTable {
    /// Create a table with an x column and no y columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if `x` is empty.
    pub fn new(x: impl Into<Vec<f64>>) -> Result<Self> {
        let x = x.into();
        if x.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(Self {
            x,
            columns: Vec::new(),
        })
    }

    /// Append a named y column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the column length differs from x.
    pub fn with_column(mut self, name: impl Into<String>, values: impl Into<Vec<f64>>) -> Result<Self> {
        self.push(Some(name.into()), values.into())?;
        Ok(self)
    }

    /// Build a table from unnamed y columns.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is empty or any column length differs from x.
    pub fn from_columns(x: impl Into<Vec<f64>>, columns: Vec<Vec<f64>>) -> Result<Self> {
        let mut table = Self::new(x)?;
        for values in columns {
            table.push(None, values)?;
        }
        Ok(table)
    }

    /// Build a table from row-major records: column 0 of each row becomes x,
    /// the remaining cells become y columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows or rows have different widths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyData)?;
        let width = first.len();
        if width == 0 {
            return Err(Error::EmptyData);
        }

        let mut x = Vec::with_capacity(rows.len());
        let mut columns = vec![Vec::with_capacity(rows.len()); width - 1];
        for row in rows {
            if row.len() != width {
                return Err(Error::DataLengthMismatch {
                    x_len: width,
                    y_len: row.len(),
                });
            }
            x.push(row[0]);
            for (col, &v) in columns.iter_mut().zip(&row[1..]) {
                col.push(v);
            }
        }

        Self::from_columns(x, columns)
    }

    fn push(&mut self, name: Option<String>, values: Vec<f64>) -> Result<()> {
        if values.len() != self.x.len() {
            return Err(Error::DataLengthMismatch {
                x_len: self.x.len(),
                y_len: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// The shared x values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; a table has at least one row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of y columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The `index`-th y column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if the table has no such column.
    pub fn column(&self, index: usize) -> Result<&[f64]> {
        self.columns
            .get(index)
            .map(|c| c.values.as_slice())
            .ok_or(Error::MissingColumn {
                index,
                available: self.columns.len(),
            })
    }

    /// Column names, with `None` for unnamed columns.
    #[must_use]
    pub fn column_names(&self) -> Vec<Option<&str>> {
        self.columns.iter().map(|c| c.name.as_deref()).collect()
    }

    /// Column names suitable as series labels; unnamed columns get their index.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.name.clone().unwrap_or_else(|| i.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_columns() {
        let table = SeriesTable::new(vec![0.0, 1.0, 2.0])
            .and_then(|t| t.with_column("B", vec![1.0, 2.0, 3.0]))
            .and_then(|t| t.with_column("C", vec![3.0, 2.0, 1.0]))
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.labels(), vec!["B", "C"]);
        assert_eq!(table.column(1).unwrap(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_column_names_and_fallback_labels() {
        let table = SeriesTable::from_columns(vec![0.0, 1.0], vec![vec![1.0, 2.0], vec![2.0, 3.0]])
            .and_then(|t| t.with_column("C", vec![3.0, 4.0]))
            .unwrap();
        assert_eq!(table.column_names(), vec![None, None, Some("C")]);
        assert_eq!(table.labels(), vec!["0", "1", "C"]);
    }

    #[test]
    fn test_missing_column() {
        let table = SeriesTable::from_columns(vec![0.0, 1.0], vec![vec![1.0, 2.0]]).unwrap();
        match table.column(3) {
            Err(Error::MissingColumn { index, available }) => {
                assert_eq!(index, 3);
                assert_eq!(available, 1);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_length_mismatch() {
        let result = SeriesTable::from_columns(vec![0.0, 1.0, 2.0], vec![vec![1.0]]);
        assert!(matches!(
            result,
            Err(Error::DataLengthMismatch { x_len: 3, y_len: 1 })
        ));
    }

    #[test]
    fn test_empty_x_rejected() {
        assert!(matches!(SeriesTable::new(Vec::new()), Err(Error::EmptyData)));
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![0.0, 10.0, 20.0], vec![1.0, 11.0, 21.0]];
        let table = SeriesTable::from_rows(&rows).unwrap();

        assert_eq!(table.x(), &[0.0, 1.0]);
        assert_eq!(table.column(0).unwrap(), &[10.0, 11.0]);
        assert_eq!(table.column(1).unwrap(), &[20.0, 21.0]);
        assert_eq!(table.labels(), vec!["0", "1"]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![vec![0.0, 10.0], vec![1.0]];
        assert!(SeriesTable::from_rows(&rows).is_err());
    }
}
