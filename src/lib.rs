//! Crop disease identification core: turn a picked image into a tensor, run
//! an opaque classifier over it and report the top label with its confidence.

pub mod config;
pub mod decision;
pub mod error;
pub mod image_acquirer;
pub mod inference_engine;
pub mod library;
pub mod normalizer;
pub mod predictor;
