use serde::Deserialize;
use std::env;

pub const DEFAULT_PORT: u16 = 4184;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.trim().parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// Non-empty string variable, `None` when unset or blank.
fn env_string_opt(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language codes, joined with `+` (e.g. `eng+deu`).
    pub languages: String,
    /// Directory holding `*.traineddata`. `None` lets Tesseract pick its default.
    pub data_path: Option<String>,
    pub timeout_secs: u64,
    pub page_seg_mode: Option<u8>,
    pub char_whitelist: Option<String>,
    pub preprocess: bool,
    pub max_image_dimension: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            data_path: None,
            timeout_secs: 60,
            page_seg_mode: None,
            char_whitelist: None,
            preprocess: false,
            max_image_dimension: 4096,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let server_defaults = ServerConfig::default();
        let ocr_defaults = OcrConfig::default();

        Self {
            server: ServerConfig {
                host: env_string_opt("HOST").unwrap_or(server_defaults.host),
                port: parse_env_or("PORT", server_defaults.port),
                max_body_bytes: parse_env_or("MAX_BODY_BYTES", server_defaults.max_body_bytes),
            },
            ocr: OcrConfig {
                languages: env_string_opt("OCR_LANGUAGES").unwrap_or(ocr_defaults.languages),
                data_path: env_string_opt("OCR_DATA_PATH"),
                timeout_secs: parse_env_or("OCR_TIMEOUT", ocr_defaults.timeout_secs),
                page_seg_mode: parse_env_opt("OCR_PAGE_SEG_MODE"),
                char_whitelist: env_string_opt("OCR_CHAR_WHITELIST"),
                preprocess: parse_env_or("OCR_PREPROCESS", ocr_defaults.preprocess),
                max_image_dimension: parse_env_or(
                    "OCR_MAX_DIMENSION",
                    ocr_defaults.max_image_dimension,
                ),
            },
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
