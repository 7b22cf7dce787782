//! OCR (Optical Character Recognition) Module
//!
//! Turns a base64 image payload into text:
//! - `decode` unwraps the base64 payload and decodes the image into a bitmap
//! - `preprocessing` optionally cleans the bitmap up for Tesseract
//! - `provider` owns the Tesseract engine (via leptess) and runs recognition
//!
//! # Configuration
//!
//! OCR behavior is controlled via `OcrConfig` (see `config.rs`):
//! - `languages`: Tesseract language codes, e.g. "eng" or "eng+deu"
//! - `data_path`: tessdata directory override
//! - `timeout_secs`: upper bound on a single recognition
//! - `page_seg_mode` / `char_whitelist`: Tesseract tuning knobs
//! - `preprocess` / `max_image_dimension`: bitmap cleanup before recognition
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr);
//! let bytes = decode_payload(&request.data)?;
//! let decoded = decode_image(&bytes)?;
//! let text = ocr.ocr(&encode_png(&decoded.image)?).await?;
//! ```

mod decode;
mod preprocessing;
mod provider;

pub use decode::{decode_image, decode_payload, encode_png, DecodedImage};
pub use preprocessing::preprocess_image;
pub use provider::OcrProvider;
