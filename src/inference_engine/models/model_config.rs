use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// Side length of the square RGB input the model expects.
    pub input_size: NonZeroU32,
}
