use chrono::Offset;
use crate::inference_engine::models::model_config::ModelConfig;
use image::imageops::FilterType;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// How long a loaded model lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLifecycle {
    /// Load once and reuse the handle for every request.
    KeepLoaded,
    /// Load at the start of each request and release it when the request ends.
    PerRequest,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub labels_path: PathBuf,
    pub resize_filter: FilterType,
    pub model_lifecycle: ModelLifecycle,
    pub top_k: usize,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                onnx_model_path: PathBuf::from("model/crop_disease.onnx"),
                input_size: default_input_size(),
            },
            labels_path: PathBuf::from("assets/labels.txt"),
            resize_filter: FilterType::Triangle,
            model_lifecycle: ModelLifecycle::KeepLoaded,
            top_k: 3,
            logger_timezone: utc(),
        }
    }
}

fn default_input_size() -> NonZeroU32 {
    NonZeroU32::new(250).unwrap_or(NonZeroU32::MIN)
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
