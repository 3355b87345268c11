use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "execute success";
pub const BLOCKED_MESSAGE: &str = "no execution caused by error blocking";

/// Uniform envelope returned by every `ActionProxy::call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResult {
    pub success: bool,
    pub message: String,
}

impl CallResult {
    pub fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn blocked() -> Self {
        Self::failure(BLOCKED_MESSAGE)
    }
}
