//! # Result Notification
//!
//! Seam for sending results to an email address. The core defines the
//! contract and an acknowledging implementation only; actual delivery is the
//! job of an external mail service plugged in behind [`ResultNotifier`].

use crate::assessment::AssessmentResult;
use crate::types::SxmError;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned to the user after a notification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Trimmed recipient address.
    pub email: String,
    /// User-facing confirmation text.
    pub message: String,
}

/// Delivers an assessment result to an email address.
///
/// Implementors must be `Send + Sync` so the HTTP layer can share them.
pub trait ResultNotifier: Send + Sync {
    fn notify(&self, email: &str, result: &AssessmentResult) -> Result<Confirmation, SxmError>;
}

/// Accepts every non-empty address and confirms without sending anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcknowledgingNotifier;

impl ResultNotifier for AcknowledgingNotifier {
    fn notify(&self, email: &str, _result: &AssessmentResult) -> Result<Confirmation, SxmError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SxmError::InvalidEmail);
        }
        Ok(Confirmation {
            email: email.to_string(),
            message: format!("Results will be sent to {}", email),
        })
    }
}
