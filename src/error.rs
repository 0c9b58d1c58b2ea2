use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// The one error a prediction request can end with.
///
/// A request either produces a complete `PredictionResult` or exactly one of
/// these. Nothing is retried: decoding and inference are deterministic for a
/// fixed input.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// The image source could not be turned into readable RGB pixels.
    #[error("image acquisition failed: {context}")]
    AcquisitionFailure {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The label table and the model output disagree on the number of classes.
    #[error("label table has {labels} labels but the model produced {scores} scores")]
    ConfigMismatch { scores: usize, labels: usize },

    /// No class can be selected from an empty score vector or label table.
    #[error("empty score vector or label table")]
    EmptyInput,

    /// The model could not be loaded or run.
    #[error("inference failed: {context}")]
    InferenceFailure {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The label asset could not be read.
    #[error("failed to read label table {}", .path.display())]
    LabelTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PredictionError {
    pub fn acquisition(
        context: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::AcquisitionFailure {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn inference(
        context: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::InferenceFailure {
            context: context.into(),
            source: source.into(),
        }
    }
}
