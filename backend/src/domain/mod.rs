//! Domain primitives, use-cases and ports.
//!
//! Purpose: keep authentication and survey rules independent of HTTP and of
//! the flat-file formats used for persistence.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-neutral error payload.
//! - `Username`, `Credentials`, `AdminIdentity`: authentication primitives.
//! - `Session`: per-client authentication state.
//! - `SurveyRecord`, `Gender`: survey rows.
//! - `AuthService`: signup, login and logout.
//! - `DashboardService`: routes sessions to the admin or user dashboard.

pub mod auth;
pub mod auth_service;
pub mod dashboard;
pub mod error;
pub mod ports;
pub mod session;
pub mod survey;
pub mod trace_id;

pub use self::auth::{
    ADMIN_PASSWORD, ADMIN_USERNAME, AdminIdentity, Credentials, CredentialsValidationError,
    Username,
};
pub use self::auth_service::{AuthService, LoginError, SignupError};
pub use self::dashboard::{
    AdminDashboard, Dashboard, DashboardError, DashboardService, DashboardView, ExportError,
    SpreadsheetExport, SubmitError, UserDashboard,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::session::{MenuEntry, Session};
pub use self::survey::{Gender, MAX_NAME_CHARS, SurveyRecord, SurveyValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
