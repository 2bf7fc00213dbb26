//! Result of a single benchmark write.

use std::fmt;

/// Outcome of one `create_record` call.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The store accepted the write and charged `request_charge` cost units.
    Success { request_charge: f64 },
    /// The store declined the write because provisioned capacity was exceeded.
    Throttled {
        status_code: Option<i32>,
        message: String,
    },
    /// Any other failure (malformed record, network fault, ...).
    Failed {
        status_code: Option<i32>,
        message: String,
    },
}

impl WriteOutcome {
    pub fn success(request_charge: f64) -> Self {
        WriteOutcome::Success { request_charge }
    }

    pub fn throttled(status_code: Option<i32>, message: impl Into<String>) -> Self {
        WriteOutcome::Throttled {
            status_code,
            message: message.into(),
        }
    }

    pub fn failed(status_code: Option<i32>, message: impl Into<String>) -> Self {
        WriteOutcome::Failed {
            status_code,
            message: message.into(),
        }
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Success { request_charge } => {
                write!(f, "success ({request_charge} cost units)")
            }
            WriteOutcome::Throttled {
                status_code,
                message,
            } => match status_code {
                Some(code) => write!(f, "throttled [{code}]: {message}"),
                None => write!(f, "throttled: {message}"),
            },
            WriteOutcome::Failed {
                status_code,
                message,
            } => match status_code {
                Some(code) => write!(f, "failed [{code}]: {message}"),
                None => write!(f, "failed: {message}"),
            },
        }
    }
}
