use std::collections::{HashMap, HashSet};
use ndarray::Array1;
use crate::core::error::{ArtifactError, PipelineError};
use crate::models::{FeatureVector, FieldValue, RawCustomerInput};

/// How the encoder treats values it cannot place in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// Unmatched categories and fields are zero-filled
    #[default]
    Lenient,
    /// Values outside the trained vocabulary are rejected
    Strict,
}

/// Ordered training-time feature columns plus optional category vocabularies
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    categories: HashMap<String, Vec<String>>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, ArtifactError> {
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(ArtifactError::Inconsistent(format!(
                    "feature column {} has an empty name",
                    position
                )));
            }
            if index.insert(column.clone(), position).is_some() {
                return Err(ArtifactError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self {
            columns,
            index,
            categories: HashMap::new(),
        })
    }

    /// Attach the full category vocabulary of each categorical field,
    /// including the reference category that has no column of its own.
    pub fn with_categories(
        mut self,
        categories: HashMap<String, Vec<String>>,
    ) -> Result<Self, ArtifactError> {
        for (field, values) in &categories {
            if values.is_empty() {
                return Err(ArtifactError::Inconsistent(format!(
                    "category vocabulary for '{}' is empty",
                    field
                )));
            }
            for value in values {
                let column = one_hot_column(field, value);
                if !self.index.contains_key(&column) {
                    tracing::debug!("'{}' has no column, treating it as a reference category", column);
                }
            }
        }

        // Every trained one-hot column must name a value its field accepts
        for (field, values) in &categories {
            let prefix = format!("{}_", field);
            for column in &self.columns {
                let Some(suffix) = column.strip_prefix(&prefix) else {
                    continue;
                };
                if owned_by_longer_field(column, field, &categories) {
                    continue;
                }
                if !values.iter().any(|value| value == suffix) {
                    return Err(ArtifactError::Inconsistent(format!(
                        "column '{}' has no matching value in the '{}' vocabulary",
                        column, field
                    )));
                }
            }
        }

        self.categories = categories;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn has_vocabularies(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn vocabulary(&self, field: &str) -> Option<&[String]> {
        self.categories.get(field).map(Vec::as_slice)
    }

    /// Positions of every one-hot column belonging to `field`
    pub fn one_hot_positions(&self, field: &str) -> Vec<usize> {
        let prefix = format!("{}_", field);
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.starts_with(&prefix))
            .map(|(position, _)| position)
            .collect()
    }
}

/// True when `column` belongs to another vocabulary field whose name
/// extends `field`, e.g. `Plan_Type_Gold` under `Plan` and `Plan_Type`.
fn owned_by_longer_field(
    column: &str,
    field: &str,
    categories: &HashMap<String, Vec<String>>,
) -> bool {
    categories.keys().any(|other| {
        other.len() > field.len()
            && other.starts_with(field)
            && column.starts_with(&format!("{}_", other))
    })
}

/// Column name a categorical value expands to
#[inline]
pub fn one_hot_column(field: &str, value: &str) -> String {
    format!("{}_{}", field, value)
}

/// Projects raw customer fields into the training schema
///
/// Numeric fields land in the column of the same name. A categorical
/// field `F` with value `v` sets column `F_v` to 1. Every column no rule
/// populates stays 0, which covers the dropped reference category.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
    mode: EncodingMode,
}

impl FeatureEncoder {
    pub fn new(schema: FeatureSchema, mode: EncodingMode) -> Result<Self, ArtifactError> {
        if mode == EncodingMode::Strict && !schema.has_vocabularies() {
            return Err(ArtifactError::Inconsistent(
                "strict encoding requires category vocabularies in the feature schema".to_string(),
            ));
        }
        Ok(Self { schema, mode })
    }

    pub fn lenient(schema: FeatureSchema) -> Self {
        Self {
            schema,
            mode: EncodingMode::Lenient,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn dimension(&self) -> usize {
        self.schema.len()
    }

    pub fn encode(&self, raw: &RawCustomerInput) -> Result<FeatureVector, PipelineError> {
        let mut values = Array1::<f64>::zeros(self.schema.len());
        let mut seen = HashSet::with_capacity(raw.len());

        for (field, value) in raw.fields() {
            if !seen.insert(field.as_str()) {
                return Err(PipelineError::Validation(format!(
                    "field '{}' supplied more than once",
                    field
                )));
            }

            match value {
                FieldValue::Numeric(x) => {
                    if !x.is_finite() {
                        return Err(PipelineError::NonFinite(field.clone()));
                    }
                    match self.schema.index_of(field) {
                        Some(position) => values[position] = *x,
                        None if self.mode == EncodingMode::Strict => {
                            return Err(PipelineError::UnknownField(field.clone()));
                        }
                        None => tracing::debug!("Numeric field '{}' is not in the schema, ignoring", field),
                    }
                }
                FieldValue::Category(category) => {
                    if self.mode == EncodingMode::Strict {
                        self.check_vocabulary(field, category)?;
                    }
                    let column = one_hot_column(field, category);
                    match self.schema.index_of(&column) {
                        Some(position) => values[position] = 1.0,
                        None => tracing::debug!("No column '{}', leaving {}_* zero-filled", column, field),
                    }
                }
            }
        }

        Ok(FeatureVector::new(values))
    }

    fn check_vocabulary(&self, field: &str, category: &str) -> Result<(), PipelineError> {
        let vocabulary = self
            .schema
            .vocabulary(field)
            .ok_or_else(|| PipelineError::UnknownField(field.to_string()))?;

        if vocabulary.iter().any(|known| known == category) {
            Ok(())
        } else {
            Err(PipelineError::UnknownCategory {
                field: field.to_string(),
                value: category.to_string(),
            })
        }
    }
}
