use super::Error;

/// Error when model or relation metadata is invalid.
///
/// This occurs when:
/// - A relation name is not declared on the model it is looked up on
/// - A relation lists a different number of keys on each side
/// - A relation names a field the model does not have
/// - A relation targets a model that was never registered
/// - An accessor is used with a relation of a different kind
///
/// These errors are configuration mistakes. They surface when the schema is
/// built or when a relation is first resolved, and retrying never helps.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Creates the error reported when a relation lookup misses.
    pub fn relation_not_declared(model: &str, relation: &str) -> Error {
        Error::invalid_schema(format!(
            "relation `{relation}` not declared on model `{model}`"
        ))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid
    /// schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.kinds()
            .any(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
