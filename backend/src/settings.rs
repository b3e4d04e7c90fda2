//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SURVEY_*` environment variables and an
//! optional configuration file, in increasing order of precedence.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_USERS_FILE: &str = "users.yaml";
const DEFAULT_SURVEY_FILE: &str = "survey_data.xlsx";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime configuration for the survey server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SURVEY")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// YAML file holding registered credentials.
    pub users_file: Option<PathBuf>,
    /// Spreadsheet holding submitted surveys.
    pub survey_file: Option<PathBuf>,
    /// File containing the cookie signing key (at least 64 bytes).
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Fall back to a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Credential file path, falling back to `users.yaml`.
    pub fn users_file(&self) -> PathBuf {
        self.users_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE))
    }

    /// Survey workbook path, falling back to `survey_data.xlsx`.
    pub fn survey_file(&self) -> PathBuf {
        self.survey_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SURVEY_FILE))
    }

    /// Session key path, falling back to `/var/run/secrets/session_key`.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}
