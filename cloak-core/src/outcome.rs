//! Uniform result envelope for host-facing operations.
//!
//! Hosts that bridge into other runtimes get a flat `{code, kind, message,
//! result}` shape instead of a Rust `Result`, so failures can cross the
//! boundary without losing the error taxonomy.

use serde::{Deserialize, Serialize};

use crate::error::CloakError;

/// Code reported for a successful operation.
pub const CODE_SUCCESS: u32 = 0;

/// Code reported for any failed operation.
pub const CODE_FAILURE: u32 = 50_000;

/// Flat operation outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome<T> {
    /// 0 on success, 50000 on failure.
    pub code: u32,
    /// Stable error kind; empty on success.
    pub kind: String,
    /// Human-readable message; empty on success.
    pub message: String,
    /// Operation result; absent on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> Outcome<T> {
    /// Wraps a successful result.
    pub fn ok(result: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            kind: String::new(),
            message: String::new(),
            result: Some(result),
        }
    }

    /// Wraps a failure, preserving kind and message.
    pub fn err(error: &CloakError) -> Self {
        Self {
            code: CODE_FAILURE,
            kind: error.kind().to_string(),
            message: error.to_string(),
            result: None,
        }
    }

    /// True when the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

impl<T> From<crate::error::Result<T>> for Outcome<T> {
    fn from(res: crate::error::Result<T>) -> Self {
        match res {
            Ok(value) => Outcome::ok(value),
            Err(err) => Outcome::err(&err),
        }
    }
}
