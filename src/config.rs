//! YAML description of a record layout, for tooling that has no compiled
//! record type to bind against.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{FormatError, Result},
    mapping::{Binding, BoundField, FieldKind, TypedRecord},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    FieldKind::Text.as_str().to_string()
}

impl RecordSchema {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FormatError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                FormatError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let schema: RecordSchema =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|err| FormatError::Config {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        schema.validate(path)?;
        Ok(schema)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::to_writer(BufWriter::new(file), self).map_err(|err| FormatError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Describes a compiled record type in schema form.
    pub fn describe<T: TypedRecord>() -> Self {
        RecordSchema {
            columns: T::FIELDS
                .iter()
                .map(|spec| ColumnSpec {
                    name: spec.name.to_string(),
                    kind: spec.kind.as_str().to_string(),
                })
                .collect(),
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    /// Resolves every kind name; the first unknown one is an error.
    pub fn bind(&self) -> Result<Binding> {
        let fields = self
            .columns
            .iter()
            .map(|column| {
                Ok(BoundField {
                    name: column.name.clone(),
                    kind: FieldKind::resolve(&column.name, &column.kind)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Binding::from_fields(fields))
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if column.name.trim().is_empty() {
                return Err(FormatError::Config {
                    path: path.to_path_buf(),
                    message: "column name must not be empty".to_string(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(FormatError::Config {
                    path: path.to_path_buf(),
                    message: format!("duplicate column '{}'", column.name),
                });
            }
        }
        Ok(())
    }
}
