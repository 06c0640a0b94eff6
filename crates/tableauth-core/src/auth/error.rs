use crate::BoxError;
use derive_more::Display;
use thiserror::Error;

/// The error returned when an authentication attempt could not be answered. The [`ErrorKind`]
/// tells which piece of configuration is missing or whether the lookup itself failed.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    /// Creates a new error of the given kind, caused by `error`.
    pub fn new<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error {
            kind,
            source: Some(error.into()),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind, source: None }
    }
}

/// The kinds of [`Error`] an adapter can produce.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum ErrorKind {
    /// No table name was configured.
    #[display("A table must be supplied for the authentication adapter.")]
    MissingTableName,
    /// No identity column was configured.
    #[display("An identity column must be supplied for the authentication adapter.")]
    MissingIdentityColumn,
    /// No credential column was configured.
    #[display("A credential column must be supplied for the authentication adapter.")]
    MissingCredentialColumn,
    /// The identity was not set, or set to an empty string.
    #[display("A value for the identity was not provided prior to authentication.")]
    MissingIdentity,
    /// The credential was not set.
    #[display("A credential value was not provided prior to authentication.")]
    MissingCredential,
    /// The credential validation callback could not be resolved.
    #[display("Invalid callback provided")]
    InvalidCallback,
    /// The lookup query could not be written or executed. The source holds the cause.
    #[display("The supplied parameters failed to produce a valid sql statement, please check table and column names for validity.")]
    InvalidQuery,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn display_is_the_kind_message() {
        let err = Error::from(ErrorKind::MissingIdentity);
        assert_eq!(err.to_string(), "A value for the identity was not provided prior to authentication.");
        assert!(err.source().is_none());
    }

    #[test]
    fn source_is_kept() {
        let err = Error::new(ErrorKind::InvalidQuery, "no such table: usr");
        assert_eq!(err.kind(), ErrorKind::InvalidQuery);
        assert_eq!(err.source().map(|s| s.to_string()), Some("no such table: usr".to_string()));
    }
}
