//! Uniform result envelope.
//!
//! Every tool outcome is turned into an [`Envelope`] in one place,
//! [`Envelope::from_result`]. Nothing past this point sees a `Result`.

use crate::error::OperationError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success { data: Value },
    Failure { message: String },
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Envelope::Success { data }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Envelope::Failure {
            message: message.into(),
        }
    }

    /// Normalize an operation outcome.
    pub fn from_result<T>(result: Result<T, OperationError>) -> Self
    where
        T: serde::Serialize,
    {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(data) => Envelope::success(data),
                Err(e) => Envelope::failure(e.to_string()),
            },
            Err(err) => Envelope::failure(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Success { data } => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { message } => Some(message),
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Envelope::Success { data } => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("data", data)?;
            }
            Envelope::Failure { message } => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("message", message)?;
            }
        }
        state.end()
    }
}
