use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrProvider;
use crate::solver::CaptchaSolver;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub solver: CaptchaSolver,
}

impl AppState {
    pub fn new(config: Config, ocr: OcrProvider) -> Self {
        let solver = CaptchaSolver::new(ocr, &config.ocr);

        Self {
            config: Arc::new(config),
            solver,
        }
    }

    /// Build state from config, initialising the OCR engine it describes.
    pub fn from_config(config: Config) -> Self {
        let ocr = OcrProvider::new(&config.ocr);
        Self::new(config, ocr)
    }
}
