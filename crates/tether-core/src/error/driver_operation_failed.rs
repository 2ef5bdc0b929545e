use super::Error;

/// Error when a database driver operation fails.
///
/// This wraps errors from the underlying database library: connection
/// failures, statement execution errors (including constraint violations),
/// transaction control statements and schema creation.
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a driver operation failure.
    ///
    /// Drivers convert every error raised by their database library through
    /// this constructor. The relation layer never retries or swallows these.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error, or any error it wraps, is a driver
    /// operation failure.
    pub fn is_driver_operation_failed(&self) -> bool {
        self.kinds()
            .any(|kind| matches!(kind, super::ErrorKind::DriverOperationFailed(_)))
    }
}
