//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use dreamweaver_gemini::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

use crate::error::AppError;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address host (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Directory holding the saved worlds (`DREAMWEAVER_DATA_DIR`, default `./data`).
    pub data_dir: PathBuf,
    /// Gemini API key (`GEMINI_API_KEY`, required).
    pub gemini_api_key: String,
    /// Text model (`DREAMWEAVER_TEXT_MODEL`).
    pub text_model: String,
    /// Image model (`DREAMWEAVER_IMAGE_MODEL`).
    pub image_model: String,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `GEMINI_API_KEY` is missing or `PORT`
    /// is not a valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("GEMINI_API_KEY environment variable must be set".into())
            })?;
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            data_dir: lookup("DREAMWEAVER_DATA_DIR").map_or_else(|| PathBuf::from("./data"), PathBuf::from),
            gemini_api_key,
            text_model: lookup("DREAMWEAVER_TEXT_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_owned()),
            image_model: lookup("DREAMWEAVER_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_owned()),
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
