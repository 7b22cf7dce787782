#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use leptess::{LepTess, Variable};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{Result, SolverError};

enum OcrBackend {
    Local { tesseract: Arc<Mutex<LepTess>> },
    Unavailable { reason: String },
}

pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
    /// Recognitions that actually reached the engine.
    #[cfg(test)]
    recognitions: Arc<AtomicUsize>,
}

fn create_tesseract(config: &OcrConfig) -> std::result::Result<LepTess, String> {
    let mut lt =
        LepTess::new(config.data_path.as_deref(), &config.languages).map_err(|e| e.to_string())?;

    if let Some(psm) = config.page_seg_mode {
        lt.set_variable(Variable::TesseditPagesegMode, &psm.to_string())
            .map_err(|_| format!("invalid page segmentation mode {psm}"))?;
    }

    if let Some(whitelist) = &config.char_whitelist {
        lt.set_variable(Variable::TesseditCharWhitelist, whitelist)
            .map_err(|_| format!("invalid character whitelist '{whitelist}'"))?;
    }

    Ok(lt)
}

impl OcrProvider {
    /// Initialise Tesseract. A missing library or language data does not fail
    /// startup; the provider reports itself unavailable instead.
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match create_tesseract(config) {
            Ok(lt) => {
                info!(
                    languages = %config.languages,
                    page_seg_mode = ?config.page_seg_mode,
                    "Tesseract OCR initialized"
                );
                OcrBackend::Local {
                    tesseract: Arc::new(Mutex::new(lt)),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            config: config.clone(),
            #[cfg(test)]
            recognitions: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            OcrBackend::Unavailable { reason } => Some(reason),
            OcrBackend::Local { .. } => None,
        }
    }

    pub fn languages(&self) -> &str {
        &self.config.languages
    }

    /// Run recognition on encoded image bytes and return the raw engine output.
    pub async fn ocr(&self, image_bytes: &[u8]) -> Result<String> {
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);

        let result = tokio::time::timeout(timeout_duration, self.ocr_internal(image_bytes)).await;

        match result {
            Ok(inner_result) => inner_result,
            Err(_) => Err(SolverError::Ocr(format!(
                "OCR operation timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }

    async fn ocr_internal(&self, image_bytes: &[u8]) -> Result<String> {
        match &self.backend {
            OcrBackend::Local { tesseract } => {
                // Wait for the engine here, inside the caller's timeout, so a
                // caller that gives up never queues work on the blocking pool.
                let mut lt = Arc::clone(tesseract).lock_owned().await;
                let bytes = image_bytes.to_vec();
                #[cfg(test)]
                let recognitions = Arc::clone(&self.recognitions);

                let text = tokio::task::spawn_blocking(move || {
                    #[cfg(test)]
                    recognitions.fetch_add(1, Ordering::SeqCst);
                    lt.set_image_from_mem(&bytes)
                        .map_err(|e| SolverError::Ocr(format!("Failed to set image: {e}")))?;
                    lt.get_utf8_text()
                        .map_err(|e| SolverError::Ocr(format!("Failed to extract text: {e}")))
                })
                .await
                .map_err(|e| SolverError::Internal(format!("OCR task panicked: {e}")))??;

                debug!(raw_len = text.len(), "Tesseract returned text");
                Ok(text)
            }
            OcrBackend::Unavailable { reason } => Err(SolverError::OcrUnavailable(reason.clone())),
        }
    }
}

impl Clone for OcrProvider {
    fn clone(&self) -> Self {
        let backend = match &self.backend {
            OcrBackend::Local { tesseract } => OcrBackend::Local {
                tesseract: Arc::clone(tesseract),
            },
            OcrBackend::Unavailable { reason } => OcrBackend::Unavailable {
                reason: reason.clone(),
            },
        };

        Self {
            backend,
            config: self.config.clone(),
            #[cfg(test)]
            recognitions: Arc::clone(&self.recognitions),
        }
    }
}

#[cfg(test)]
impl OcrProvider {
    pub(crate) fn unavailable(reason: &str, config: &OcrConfig) -> Self {
        Self {
            backend: OcrBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: config.clone(),
            recognitions: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn engine(&self) -> Option<Arc<Mutex<LepTess>>> {
        match &self.backend {
            OcrBackend::Local { tesseract } => Some(Arc::clone(tesseract)),
            OcrBackend::Unavailable { .. } => None,
        }
    }

    fn recognitions(&self) -> usize {
        self.recognitions.load(Ordering::SeqCst)
    }
}
