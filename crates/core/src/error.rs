#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed geometry: too few vertices, zero area, or a point where a
    /// region was expected.
    #[error("Shape error: {0}")]
    Shape(String),

    /// A task input or solution output could not be decoded into shapes.
    #[error("Payload error: {0}")]
    Payload(String),

    #[error("No shapes were matched into a group")]
    EmptyGroup,

    #[error("Validation failed: {0}")]
    Validation(String),
}
