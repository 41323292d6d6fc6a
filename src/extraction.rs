use tracing::warn;

use crate::error::{FbrefError, Result};

/// Outcome of running an extractor over a page.
///
/// Extractors never fail outright. A missing landmark is reported as
/// [`Extraction::NotFound`], markup that has the landmarks but cannot be
/// assembled into the expected shape is [`Extraction::Malformed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Found(T),
    NotFound { context: &'static str },
    Malformed { reason: String },
}

impl<T> Extraction<T> {
    /// Wrap the result of a fallible parse, logging and downgrading errors.
    pub(crate) fn from_result(result: Result<T>, what: &'static str) -> Self {
        match result {
            Ok(value) => Extraction::Found(value),
            Err(FbrefError::ElementNotFound { context }) => {
                warn!(what, context, "landmark not found");
                Extraction::NotFound { context }
            }
            Err(e) => {
                warn!(what, error = %e, "extraction failed");
                Extraction::Malformed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Whether a value was extracted.
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    /// The extracted value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Extraction::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the extracted value, keeping soft outcomes as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extraction<U> {
        match self {
            Extraction::Found(value) => Extraction::Found(f(value)),
            Extraction::NotFound { context } => Extraction::NotFound { context },
            Extraction::Malformed { reason } => Extraction::Malformed { reason },
        }
    }

    /// Convert into a `Result`, treating both soft outcomes as errors.
    pub fn into_result(self) -> Result<T> {
        match self {
            Extraction::Found(value) => Ok(value),
            Extraction::NotFound { context } => Err(FbrefError::ElementNotFound { context }),
            Extraction::Malformed { reason } => Err(FbrefError::Malformed(reason)),
        }
    }
}

impl<T: Default> Extraction<T> {
    /// The extracted value, or an empty one when extraction did not succeed.
    pub fn into_lenient(self) -> T {
        match self {
            Extraction::Found(value) => value,
            Extraction::NotFound { context } => {
                warn!(context, "returning empty result");
                T::default()
            }
            Extraction::Malformed { reason } => {
                warn!(%reason, "returning empty result");
                T::default()
            }
        }
    }
}
