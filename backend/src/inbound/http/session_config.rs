//! Session cookie configuration.
//!
//! Turns [`AppSettings`] into the signing key and cookie flags used by the
//! session middleware, validating the key file on the way.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroizing;

use crate::settings::AppSettings;

/// Minimum key file length accepted for cookie signing and encryption.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file.
    Debug,
    /// Release builds require a readable key file unless explicitly relaxed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use survey_backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from configuration.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while loading the session key.
#[derive(thiserror::Error, Debug)]
pub enum SessionKeyError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Build session settings from application settings and build mode.
///
/// A short key file is always rejected. An unreadable one falls back to a
/// generated key in debug builds or when `allow_ephemeral_key` is set.
pub fn session_settings(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionKeyError> {
    let key = session_key(
        settings.session_key_file(),
        mode.is_debug() || settings.allow_ephemeral_key,
    )?;
    Ok(SessionSettings {
        key,
        cookie_secure: settings.cookie_secure,
        same_site: SameSite::Lax,
    })
}

fn session_key(path: PathBuf, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                return Err(SessionKeyError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(error) => {
            if allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionKeyError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
