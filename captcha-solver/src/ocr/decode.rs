use std::io::Cursor;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::{Result, SolverError};

/// Standard alphabet, padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A bitmap decoded from request bytes, along with the format it was stored in.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// Decode the `data` field of a solve request into raw image bytes.
///
/// Accepts plain base64 as well as `data:<mime>;base64,<payload>` URLs.
/// Whitespace anywhere in the payload (wrapped lines, trailing newline) is ignored.
pub fn decode_payload(data: &str) -> Result<Vec<u8>> {
    let payload = strip_data_url(data.trim())?;

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if compact.is_empty() {
        return Err(SolverError::Decode("Image payload is empty".to_string()));
    }

    PAYLOAD_ENGINE
        .decode(compact.as_bytes())
        .map_err(|e| SolverError::Decode(format!("Invalid base64 payload: {e}")))
}

fn strip_data_url(data: &str) -> Result<&str> {
    let Some(rest) = data.strip_prefix("data:") else {
        return Ok(data);
    };

    let (header, payload) = rest.split_once(',').ok_or_else(|| {
        SolverError::Decode("Malformed data URL: missing ',' separator".to_string())
    })?;

    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err(SolverError::Decode(
            "Data URL is not base64 encoded".to_string(),
        ));
    }

    Ok(payload)
}

/// Decode image bytes into a bitmap, guessing the format from its magic bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SolverError::Decode(format!("Failed to read image: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| SolverError::Decode("Unrecognized image format".to_string()))?;

    let image = reader
        .decode()
        .map_err(|e| SolverError::Decode(format!("Failed to decode {format:?} image: {e}")))?;

    Ok(DecodedImage { image, format })
}

/// Encode a bitmap as PNG, the format handed to the OCR engine.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| SolverError::Internal(format!("Failed to encode image: {e}")))?;
    Ok(output)
}
