use crate::error::PredictionError;
use crate::normalizer::tensor::{Tensor, CHANNELS};

/// One score per class, index-aligned with the label table.
pub type ScoreVector = Vec<f32>;

/// An opaque model: tensor in, scores out.
pub trait InferenceEngine {
    fn infer(&self, tensor: &Tensor) -> Result<ScoreVector, PredictionError>;
}

/// Produces a freshly loaded engine. The engine is released when the returned
/// box is dropped.
pub trait InferenceEngineLoader {
    fn load(&self) -> Result<Box<dyn InferenceEngine + Send + Sync>, PredictionError>;
}

pub fn check_input_shape(tensor: &Tensor, input_size: usize) -> Result<(), PredictionError> {
    let expected = [1, input_size, input_size, CHANNELS];
    if tensor.shape() != expected || tensor.len() != expected.iter().product::<usize>() {
        return Err(PredictionError::inference(
            "malformed input tensor",
            format!(
                "got shape {:?}, model expects {:?}",
                tensor.shape(),
                expected
            ),
        ));
    }
    Ok(())
}
