/// Boxed error returned by a [`Loader`](crate::Loader).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`Group::get`](crate::Group::get).
///
/// Both variants are recoverable by the caller. Nothing is cached when either
/// is returned.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    /// The requested key was empty.
    #[error("key is required")]
    EmptyKey,

    /// The loader failed; its error is passed through untouched.
    #[error(transparent)]
    Load(BoxError),
}

impl GroupError {
    /// Returns `true` if the loader, rather than the caller, caused the error.
    pub fn is_load(&self) -> bool {
        matches!(self, GroupError::Load(_))
    }

    /// Unwraps the loader's error, if that is what this is.
    pub fn into_load_error(self) -> Option<BoxError> {
        match self {
            GroupError::Load(err) => Some(err),
            GroupError::EmptyKey => None,
        }
    }
}
