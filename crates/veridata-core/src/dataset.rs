use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::value::Value;

/// One named column and its values, in row order.
#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<Value>,
}

/// An immutable, column-oriented batch of records under evaluation.
///
/// Columns keep their declared order; lookups go through a name index.
/// The dataset is read-only for the lifetime of a validation run.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    lookup: HashMap<String, usize>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from ordered `(name, values)` pairs.
    ///
    /// Fails when two columns share a name or when column lengths differ.
    pub fn new(columns: Vec<(String, Vec<Value>)>) -> Result<Self> {
        let mut lookup = HashMap::with_capacity(columns.len());
        let row_count = columns.first().map(|(_, values)| values.len()).unwrap_or(0);

        let mut built = Vec::with_capacity(columns.len());
        for (index, (name, values)) in columns.into_iter().enumerate() {
            if lookup.insert(name.clone(), index).is_some() {
                return Err(Error::InvalidDataset(format!(
                    "duplicate column name: {name}"
                )));
            }
            if values.len() != row_count {
                return Err(Error::InvalidDataset(format!(
                    "column '{}' has {} row(s), expected {}",
                    name,
                    values.len(),
                    row_count
                )));
            }
            built.push(Column { name, values });
        }

        Ok(Self {
            columns: built,
            lookup,
            row_count,
        })
    }

    /// Values of the named column, in row order.
    pub fn column(&self, name: &str) -> Result<&[Value]> {
        self.lookup
            .get(name)
            .map(|index| self.columns[*index].values.as_slice())
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Number of rows shared by every column.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Column names in declared order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}
