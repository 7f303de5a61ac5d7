use thiserror::Error;

/// Errors surfaced while rendering an operation tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Operation kind has no registered renderer.
    #[error("No renderer registered for operation kind '{0}'")]
    UnsupportedOperation(String),

    /// Construct is recognized but its rendering is deliberately absent.
    #[error("Rendering not implemented for {0}")]
    NotImplemented(String),

    /// Reference or expression that cannot be resolved into script text.
    #[error("Malformed reference: {0}")]
    MalformedReference(String),
}
