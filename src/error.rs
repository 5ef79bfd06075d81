use std::fmt::{self, Display};

use thiserror::Error;

/// Failure of a single optimization call. Nothing here is retried internally.
#[derive(Error, Debug)]
pub enum TuneError {
    /// The request carried something the optimizer cannot work with. Retrying
    /// with the same bytes reproduces the same failure.
    #[error("invalid parameter[expected={expected}][actual={actual}]{}", Detail(.detail))]
    ParameterInvalid {
        expected: String,
        actual: String,
        detail: Option<String>,
    },
    /// The tuned search params could not be marshalled back to JSON. `reason`
    /// carries the underlying error.
    #[error("service unavailable: {reason}{}", Detail(.detail))]
    ServiceUnavailable {
        reason: String,
        detail: Option<String>,
    },
}

impl TuneError {
    pub fn parameter_invalid(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ParameterInvalid {
            expected: expected.into(),
            actual: actual.into(),
            detail: None,
        }
    }

    pub fn parameter_invalid_with(
        expected: impl Into<String>,
        actual: impl Into<String>,
        detail: impl Display,
    ) -> Self {
        Self::ParameterInvalid {
            expected: expected.into(),
            actual: actual.into(),
            detail: Some(detail.to_string()),
        }
    }

    pub fn service_unavailable(reason: impl Display, detail: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            reason: reason.to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn is_parameter_invalid(&self) -> bool {
        matches!(self, Self::ParameterInvalid { .. })
    }
}

struct Detail<'a>(&'a Option<String>);

impl Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(detail) => write!(f, ": {detail}"),
            None => Ok(()),
        }
    }
}
