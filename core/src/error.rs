use thiserror::Error;

/// Why a bundled entry could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("no entry named {name:?} in bundle (entries: {available:?})")]
    Missing { name: String, available: Vec<String> },
    #[error("entry {name:?} is a directory, not a file")]
    NotAFile { name: String },
}

/// The bundled resource could not be read. This is a packaging defect, not a
/// transient condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to read bundled resource {name}: {source}")]
pub struct ResourceReadError {
    pub name:   String,
    #[source]
    pub source: LookupFailure,
}

#[derive(Debug, Error)]
pub enum EndpointsError {
    #[error(transparent)]
    Read(#[from] ResourceReadError),
    #[error("failed to parse endpoints document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("no partition found for client region {0}")]
    UnknownPartition(String),
    #[error("configured regions {patterns:?} do not match any region in partition {partition}")]
    UnmatchedRegions { partition: String, patterns: Vec<String> },
}
