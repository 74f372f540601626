use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },
    #[error("taxonomy tree has no '{0}' root node")]
    MissingTaxonomyRoot(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
