use crate::error::PredictionError;
use crate::inference_engine::interface::{
    check_input_shape, InferenceEngine, InferenceEngineLoader, ScoreVector,
};
use crate::library::logger::interface::Logger;
use crate::normalizer::tensor::Tensor;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum FakeScores {
    /// Always answer with these scores.
    Fixed(ScoreVector),
    /// A fresh random distribution over `num_classes` that sums to 1.
    Random { num_classes: usize },
    /// Fail every call with this reason.
    Failing(String),
}

pub struct InferenceEngineFake {
    scores: FakeScores,
    input_size: usize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceEngineFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        input_size: usize,
        scores: FakeScores,
    ) -> Self {
        Self {
            scores,
            input_size,
            logger: logger.with_namespace("inference_engine").with_namespace("fake"),
        }
    }
}

impl InferenceEngine for InferenceEngineFake {
    fn infer(&self, tensor: &Tensor) -> Result<ScoreVector, PredictionError> {
        check_input_shape(tensor, self.input_size)?;
        let _ = self
            .logger
            .info(&format!("Inferring on tensor {:?}", tensor.shape()));

        match &self.scores {
            FakeScores::Fixed(scores) => Ok(scores.clone()),
            FakeScores::Random { num_classes } => random_distribution(*num_classes),
            FakeScores::Failing(reason) => Err(PredictionError::inference(
                "fake engine failure",
                reason.clone(),
            )),
        }
    }
}

fn random_distribution(num_classes: usize) -> Result<ScoreVector, PredictionError> {
    let mut rng = rand::rng();
    let score_dist = Uniform::new(0.0f32, 1.0)
        .map_err(|e| PredictionError::inference("invalid fake score range", e))?;

    let raw: Vec<f32> = (0..num_classes).map(|_| score_dist.sample(&mut rng)).collect();
    let total: f32 = raw.iter().sum();
    if total <= 0.0 {
        return Ok(vec![1.0 / num_classes as f32; num_classes]);
    }

    Ok(raw.iter().map(|score| score / total).collect())
}

/// Hands out `InferenceEngineFake`s and counts how many were loaded and how
/// many have since been dropped.
pub struct InferenceEngineLoaderFake {
    scores: FakeScores,
    input_size: usize,
    fail_load: bool,
    logger: Arc<dyn Logger + Send + Sync>,
    loads: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl InferenceEngineLoaderFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        input_size: usize,
        scores: FakeScores,
    ) -> Self {
        Self {
            scores,
            input_size,
            fail_load: false,
            logger,
            loads: Arc::new(AtomicUsize::new(0)),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl InferenceEngineLoader for InferenceEngineLoaderFake {
    fn load(&self) -> Result<Box<dyn InferenceEngine + Send + Sync>, PredictionError> {
        if self.fail_load {
            return Err(PredictionError::inference(
                "could not load fake model",
                "load disabled",
            ));
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedEngineFake {
            engine: InferenceEngineFake::new(
                self.logger.clone(),
                self.input_size,
                self.scores.clone(),
            ),
            releases: self.releases.clone(),
        }))
    }
}

struct TrackedEngineFake {
    engine: InferenceEngineFake,
    releases: Arc<AtomicUsize>,
}

impl InferenceEngine for TrackedEngineFake {
    fn infer(&self, tensor: &Tensor) -> Result<ScoreVector, PredictionError> {
        self.engine.infer(tensor)
    }
}

impl Drop for TrackedEngineFake {
    fn drop(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
