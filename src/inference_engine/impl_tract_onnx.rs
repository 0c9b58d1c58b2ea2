use crate::error::PredictionError;
use crate::inference_engine::interface::{
    check_input_shape, InferenceEngine, InferenceEngineLoader, ScoreVector,
};
use crate::inference_engine::models::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use crate::normalizer::tensor::{Tensor, CHANNELS};
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Runs an ONNX classifier whose single input is `1 x S x S x 3` f32 and
/// whose single output holds one score per class.
pub struct InferenceEngineTractOnnx {
    model: Plan,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceEngineTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, PredictionError> {
        let logger = logger.with_namespace("inference_engine").with_namespace("tract_onnx");
        let _ = logger.info(&format!("Loading model {}", config.onnx_model_path.display()));

        let side = config.input_size.get() as usize;
        let model = load_plan(&config.onnx_model_path, side).map_err(|e| {
            PredictionError::inference(
                format!("could not load model {}", config.onnx_model_path.display()),
                e,
            )
        })?;

        let _ = logger.info("Model loaded");
        Ok(Self {
            model,
            config,
            logger,
        })
    }
}

fn load_plan(path: &Path, side: usize) -> TractResult<Plan> {
    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(0, f32::fact([1, side, side, CHANNELS]).into())?
        .into_optimized()?
        .into_runnable()
}

impl InferenceEngine for InferenceEngineTractOnnx {
    fn infer(&self, tensor: &Tensor) -> Result<ScoreVector, PredictionError> {
        check_input_shape(tensor, self.config.input_size.get() as usize)?;

        let input =
            tract_onnx::prelude::Tensor::from_shape::<f32>(&tensor.shape(), tensor.as_slice())
                .map_err(|e| PredictionError::inference("could not build model input", e))?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| PredictionError::inference("model run failed", e))?;

        let output = outputs.first().ok_or_else(|| {
            PredictionError::inference("model produced no output", "empty output list")
        })?;
        let scores: ScoreVector = output
            .to_array_view::<f32>()
            .map_err(|e| PredictionError::inference("model output is not f32", e))?
            .iter()
            .copied()
            .collect();

        let _ = self
            .logger
            .info(&format!("Model produced {} scores", scores.len()));

        Ok(scores)
    }
}

/// Loads the ONNX model anew on every call.
pub struct InferenceEngineLoaderTractOnnx {
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceEngineLoaderTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self { config, logger }
    }
}

impl InferenceEngineLoader for InferenceEngineLoaderTractOnnx {
    fn load(&self) -> Result<Box<dyn InferenceEngine + Send + Sync>, PredictionError> {
        let engine = InferenceEngineTractOnnx::new(self.config.clone(), self.logger.clone())?;
        Ok(Box::new(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::{Offset, Utc};
    use std::num::NonZeroU32;

    // Averages each channel over the image, then softmaxes the three means.
    const CHANNEL_MEAN_MODEL: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/src/inference_engine/models/channel_mean_softmax.onnx"
    );

    fn config(path: &str) -> ModelConfig {
        sized_config(path, 250)
    }

    fn sized_config(path: &str, side: u32) -> ModelConfig {
        ModelConfig {
            onnx_model_path: path.into(),
            input_size: NonZeroU32::new(side).unwrap(),
        }
    }

    fn solid_tensor(side: usize, rgb: [f32; 3]) -> Tensor {
        let data = (0..side * side).flat_map(|_| rgb).collect();
        Tensor::new(side, data)
    }

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(Utc.fix()))
    }

    #[test]
    fn test_missing_model_is_inference_failure() {
        let result = InferenceEngineTractOnnx::new(config("./model/missing.onnx"), logger());

        assert!(matches!(
            result,
            Err(PredictionError::InferenceFailure { .. })
        ));
    }

    #[test]
    fn test_loader_reports_missing_model() {
        let loader = InferenceEngineLoaderTractOnnx::new(config("./model/missing.onnx"), logger());

        assert!(matches!(
            loader.load(),
            Err(PredictionError::InferenceFailure { .. })
        ));
    }

    #[test]
    fn test_runs_model_on_pinned_input() {
        let engine =
            InferenceEngineTractOnnx::new(sized_config(CHANNEL_MEAN_MODEL, 4), logger()).unwrap();

        let scores = engine.infer(&solid_tensor(4, [0.9, 0.3, 0.0])).unwrap();

        assert_eq!(scores.len(), 3);
        assert!((scores.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(scores[0] > scores[1] && scores[1] > scores[2]);
    }

    #[test]
    fn test_channel_order_reaches_model_unchanged() {
        let engine =
            InferenceEngineTractOnnx::new(sized_config(CHANNEL_MEAN_MODEL, 4), logger()).unwrap();

        let scores = engine.infer(&solid_tensor(4, [0.0, 1.0, 0.0])).unwrap();

        let expected_top = 1.0_f32.exp() / (1.0_f32.exp() + 2.0);
        assert!((scores[1] - expected_top).abs() < 1e-5);
        assert!((scores[0] - scores[2]).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_tensor_side_is_inference_failure() {
        let engine =
            InferenceEngineTractOnnx::new(sized_config(CHANNEL_MEAN_MODEL, 4), logger()).unwrap();

        let result = engine.infer(&solid_tensor(2, [0.5, 0.5, 0.5]));

        assert!(matches!(
            result,
            Err(PredictionError::InferenceFailure { .. })
        ));
    }

    #[test]
    fn test_loader_loads_fresh_engine() {
        let loader =
            InferenceEngineLoaderTractOnnx::new(sized_config(CHANNEL_MEAN_MODEL, 4), logger());

        let engine = loader.load().unwrap();

        assert_eq!(engine.infer(&solid_tensor(4, [0.2, 0.2, 0.2])).unwrap().len(), 3);
    }
}
