//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};

/// Everything needed to build and bind the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users_file: PathBuf,
    pub(crate) survey_file: PathBuf,
}

impl ServerConfig {
    /// Construct a server configuration from session preferences and the bind
    /// address. Store paths default to the working directory.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            users_file: PathBuf::from("users.yaml"),
            survey_file: PathBuf::from("survey_data.xlsx"),
        }
    }

    /// Use `users_file` and `survey_file` as the backing stores.
    #[must_use]
    pub fn with_store_paths(mut self, users_file: PathBuf, survey_file: PathBuf) -> Self {
        self.users_file = users_file;
        self.survey_file = survey_file;
        self
    }
}
