use std::sync::Arc;

use image::GenericImageView;
use tracing::debug;

use crate::config::OcrConfig;
use crate::error::Result;
use crate::ocr::{decode_image, decode_payload, encode_png, preprocess_image, OcrProvider};

/// Base64 payload in, recognised text out.
#[derive(Clone)]
pub struct CaptchaSolver {
    ocr: OcrProvider,
    config: Arc<OcrConfig>,
}

impl CaptchaSolver {
    pub fn new(ocr: OcrProvider, config: &OcrConfig) -> Self {
        Self {
            ocr,
            config: Arc::new(config.clone()),
        }
    }

    pub fn ocr(&self) -> &OcrProvider {
        &self.ocr
    }

    /// Decode the payload, run it through the OCR engine and trim the result.
    pub async fn solve(&self, data: &str) -> Result<String> {
        let bytes = decode_payload(data)?;
        let decoded = decode_image(&bytes)?;

        let (width, height) = decoded.image.dimensions();
        debug!(
            payload_bytes = bytes.len(),
            format = ?decoded.format,
            width,
            height,
            "Decoded captcha image"
        );

        let image = if self.config.preprocess {
            preprocess_image(decoded.image, &self.config)
        } else {
            decoded.image
        };

        let png = encode_png(&image)?;
        let text = self.ocr.ocr(&png).await?;

        Ok(text.trim().to_string())
    }
}
