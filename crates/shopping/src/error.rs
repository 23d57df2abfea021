use thiserror::Error;

/// An ingredient line violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ingredient line #{index} ({name:?}, amount {amount}): {reason}")]
pub struct InvalidLineError {
    pub index: usize,
    pub name: String,
    pub amount: i64,
    pub reason: String,
}

/// The renderer cannot produce a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shopping list rendering unavailable: {0}")]
pub struct RenderingUnavailableError(pub String);

impl RenderingUnavailableError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShoppingListError {
    #[error(transparent)]
    InvalidLine(#[from] InvalidLineError),

    #[error(transparent)]
    RenderingUnavailable(#[from] RenderingUnavailableError),
}
