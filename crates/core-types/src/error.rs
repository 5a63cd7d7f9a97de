use thiserror::Error;

/// A rejected request payload or parameter. The message is written for the
/// client and surfaces as a 400 response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);
