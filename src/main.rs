use crop_disease_identifier::config::{Config, ModelLifecycle};
use crop_disease_identifier::decision::label_table::LabelTable;
use crop_disease_identifier::image_acquirer::impl_file::ImageAcquirerFile;
use crop_disease_identifier::inference_engine::impl_tract_onnx::{
    InferenceEngineLoaderTractOnnx, InferenceEngineTractOnnx,
};
use crop_disease_identifier::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crop_disease_identifier::predictor::main::{EngineHandle, Predictor};
use std::sync::Arc;

const USAGE: &str = "usage: crop-disease-identifier <image> [model.onnx] [labels.txt]";

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = Config::default();

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    if let Some(model_path) = args.next() {
        config.model.onnx_model_path = model_path.into();
    }
    if let Some(labels_path) = args.next() {
        config.labels_path = labels_path.into();
    }

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let labels = LabelTable::from_path(&config.labels_path)?;
    logger.info(&format!(
        "Loaded {} labels from {}",
        labels.len(),
        config.labels_path.display()
    ))?;

    let engine = match config.model_lifecycle {
        ModelLifecycle::KeepLoaded => EngineHandle::Shared(Arc::new(
            InferenceEngineTractOnnx::new(config.model.clone(), logger.clone())?,
        )),
        ModelLifecycle::PerRequest => EngineHandle::PerRequest(Arc::new(
            InferenceEngineLoaderTractOnnx::new(config.model.clone(), logger.clone()),
        )),
    };

    let predictor = Predictor::new(config, logger.clone(), labels, engine);
    let acquirer = ImageAcquirerFile::new(image_path, logger);

    let result = predictor.predict(&acquirer)?;
    println!("{}", result);

    Ok(())
}
