use crate::config::Config;
use crate::decision::decide::{decide, rank};
use crate::decision::label_table::LabelTable;
use crate::decision::prediction::PredictionResult;
use crate::error::PredictionError;
use crate::image_acquirer::interface::{Image, ImageAcquirer};
use crate::inference_engine::interface::{InferenceEngine, InferenceEngineLoader, ScoreVector};
use crate::library::logger::interface::Logger;
use crate::normalizer::normalize::normalize_with_filter;
use crate::normalizer::tensor::Tensor;
use std::sync::Arc;

/// Where the model comes from for each request.
#[derive(Clone)]
pub enum EngineHandle {
    /// A model loaded once by the caller and reused.
    Shared(Arc<dyn InferenceEngine + Send + Sync>),
    /// A model loaded at the start of each request and released when it ends.
    PerRequest(Arc<dyn InferenceEngineLoader + Send + Sync>),
}

/// The acquire, normalize, infer, decide pipeline as one blocking call.
pub struct Predictor {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    labels: LabelTable,
    engine: EngineHandle,
}

impl Predictor {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        labels: LabelTable,
        engine: EngineHandle,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("predictor"),
            labels,
            engine,
        }
    }

    pub fn predict(
        &self,
        acquirer: &dyn ImageAcquirer,
    ) -> Result<PredictionResult, PredictionError> {
        acquirer
            .acquire()
            .and_then(|image| self.run(&image))
            .inspect_err(|e| self.log_failure(e))
    }

    pub fn predict_image(&self, image: &Image) -> Result<PredictionResult, PredictionError> {
        self.run(image).inspect_err(|e| self.log_failure(e))
    }

    fn run(&self, image: &Image) -> Result<PredictionResult, PredictionError> {
        let _ = self.logger.info(&format!(
            "Normalizing {}x{} image",
            image.width(),
            image.height()
        ));
        let tensor = normalize_with_filter(
            image,
            self.config.model.input_size,
            self.config.resize_filter,
        );

        let scores = self.infer(&tensor)?;

        let result = decide(&scores, &self.labels)?;
        if let Ok(ranked) = rank(&scores, &self.labels, self.config.top_k) {
            let summary: Vec<String> = ranked.iter().map(ToString::to_string).collect();
            let _ = self.logger.info(&format!("Top {}: {}", ranked.len(), summary.join(", ")));
        }
        let _ = self.logger.info(&format!("Prediction: {}", result));

        Ok(result)
    }

    fn infer(&self, tensor: &Tensor) -> Result<ScoreVector, PredictionError> {
        let _ = self
            .logger
            .info(&format!("Running inference on tensor {:?}", tensor.shape()));

        match &self.engine {
            EngineHandle::Shared(engine) => engine.infer(tensor),
            EngineHandle::PerRequest(loader) => {
                let engine = LoadedEngine::load(loader.as_ref(), &self.logger)?;
                engine.infer(tensor)
            }
        }
    }

    fn log_failure(&self, error: &PredictionError) {
        let _ = self.logger.error(&format!("Prediction failed: {}", error));
    }
}

/// A model loaded for one request. Dropping it releases the model, so every
/// exit path of the request releases exactly once.
struct LoadedEngine {
    engine: Box<dyn InferenceEngine + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl LoadedEngine {
    fn load(
        loader: &(dyn InferenceEngineLoader + Send + Sync),
        logger: &Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, PredictionError> {
        let engine = loader.load()?;
        let _ = logger.info("Model acquired");
        Ok(Self {
            engine,
            logger: logger.clone(),
        })
    }

    fn infer(&self, tensor: &Tensor) -> Result<ScoreVector, PredictionError> {
        self.engine.infer(tensor)
    }
}

impl Drop for LoadedEngine {
    fn drop(&mut self) {
        let _ = self.logger.info("Model released");
    }
}
