use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use crate::config::ArtifactSettings;
use crate::core::{
    ArtifactError, EncodingMode, FeatureEncoder, FeatureSchema, LogisticModel, Predictor,
    StandardScaler,
};

/// Serialized logistic regression parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Serialized standard-scaler parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Serialized feature schema
///
/// Either a bare list of column names or an object that also carries the
/// category vocabulary of each categorical field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaArtifact {
    Columns(Vec<String>),
    Described {
        columns: Vec<String>,
        #[serde(default)]
        categories: HashMap<String, Vec<String>>,
    },
}

impl SchemaArtifact {
    pub fn into_schema(self) -> Result<FeatureSchema, ArtifactError> {
        match self {
            SchemaArtifact::Columns(columns) => FeatureSchema::new(columns),
            SchemaArtifact::Described { columns, categories } => {
                FeatureSchema::new(columns)?.with_categories(categories)
            }
        }
    }
}

/// Read and parse one JSON artifact
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
        path: display,
        source,
    })
}

/// Load the schema, scaler and model and assemble a predictor
///
/// Called once at startup. Any failure here means the process must not serve.
pub fn load_predictor(
    settings: &ArtifactSettings,
    mode: EncodingMode,
) -> Result<Predictor, ArtifactError> {
    let schema = load_json::<SchemaArtifact>(Path::new(&settings.schema_path))?.into_schema()?;
    let scaler = load_json::<ScalerArtifact>(Path::new(&settings.scaler_path))?;
    let model = load_json::<ModelArtifact>(Path::new(&settings.model_path))?;

    tracing::info!(
        "Loaded artifacts: {} feature columns from {}, scaler from {}, model from {}",
        schema.len(),
        settings.schema_path,
        settings.scaler_path,
        settings.model_path
    );

    let encoder = FeatureEncoder::new(schema, mode)?;
    let scaler = StandardScaler::new(scaler.mean, scaler.scale)?;
    let model = LogisticModel::new(model.coefficients, model.intercept)?;

    Predictor::new(encoder, scaler, model)
}
