//! The dataset collaborator: named variables plus the tables observed over them.
use super::table::Table;
use crate::error::StructureError;
use std::collections::BTreeSet;

/// Anything that can feed structure learning.
pub trait DataSource {
    /// Ordered variable names. Every table holds exactly these columns.
    fn variable_names(&self) -> &[String];

    fn raw_datasets(&self) -> &[Table];
}

/// An in-memory collection of tables sharing the same columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    variable_names: Vec<String>,
    raw_datasets: Vec<Table>,
}

impl Dataset {
    /// Takes the variable names, in column order, from the first table.
    pub fn new(tables: Vec<Table>) -> Result<Self, StructureError> {
        let variable_names = tables
            .first()
            .map(|t| t.column_names().map(str::to_string).collect())
            .unwrap_or_default();
        Self::with_variable_names(variable_names, tables)
    }

    pub fn with_variable_names(variable_names: Vec<String>, tables: Vec<Table>) -> Result<Self, StructureError> {
        let expected: BTreeSet<&str> = variable_names.iter().map(String::as_str).collect();
        if expected.len() != variable_names.len() {
            return Err(StructureError::InvalidInput("duplicate variable names".to_string()));
        }
        for (i, table) in tables.iter().enumerate() {
            let found: BTreeSet<&str> = table.column_names().collect();
            if found != expected {
                return Err(StructureError::InvalidInput(format!(
                    "table {} has columns {:?}, expected {:?}",
                    i, found, expected
                )));
            }
        }
        Ok(Self { variable_names, raw_datasets: tables })
    }
}

impl DataSource for Dataset {
    fn variable_names(&self) -> &[String] { &self.variable_names }

    fn raw_datasets(&self) -> &[Table] { &self.raw_datasets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::table::Column;

    fn table(cols: &[&str]) -> Table {
        Table::new(cols.iter().map(|c| Column::numeric(*c, [Some(1.0)])).collect()).unwrap()
    }

    #[test]
    fn test_names_come_from_first_table() {
        let ds = Dataset::new(vec![table(&["b", "a"]), table(&["a", "b"])]).unwrap();
        assert_eq!(ds.variable_names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(ds.raw_datasets().len(), 2);
    }

    #[test]
    fn test_mismatched_columns_are_rejected() {
        let err = Dataset::new(vec![table(&["a", "b"]), table(&["a", "c"])]).unwrap_err();
        assert!(matches!(err, StructureError::InvalidInput(msg) if msg.starts_with("table 1")));
    }

    #[test]
    fn test_explicit_names_must_match() {
        assert!(Dataset::with_variable_names(vec!["a".into()], vec![table(&["a", "b"])]).is_err());
        assert!(Dataset::with_variable_names(vec!["a".into(), "a".into()], vec![]).is_err());
    }

    #[test]
    fn test_empty_collection_is_allowed() {
        let ds = Dataset::new(Vec::new()).unwrap();
        assert!(ds.variable_names().is_empty());
        assert!(ds.raw_datasets().is_empty());
    }
}
