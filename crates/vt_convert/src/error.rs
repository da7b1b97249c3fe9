use thiserror::Error;
use vt_reflect::hook::HookError;
use vt_reflect::info::ReflectKind;
use vt_reflect::ops::ReflectCloneError;

// -----------------------------------------------------------------------------
// Error

/// The error returned by a failed conversion.
///
/// Conversion stops at the first error; fields written before it keep
/// their new values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The destination sits behind a shared indirection and cannot be
    /// written through.
    #[error("invalid conversion target: `{type_path}` is shared and cannot be written through")]
    InvalidTarget { type_path: &'static str },

    /// No rule converts the source shape into the destination shape.
    #[error("cannot convert {from} `{from_type}` into {to} `{to_type}`")]
    Unsupported {
        from: ReflectKind,
        from_type: &'static str,
        to: ReflectKind,
        to_type: &'static str,
    },

    /// A conversion hook failed. The error is passed through unchanged.
    #[error(transparent)]
    Hook(HookError),

    /// A value could not be copied.
    #[error("failed to copy value: {0}")]
    Clone(#[from] ReflectCloneError),

    /// The values are nested deeper than
    /// [`ConvertOptions::max_depth`](crate::ConvertOptions::max_depth).
    #[error("conversion exceeded the maximum nesting depth of {limit}")]
    DepthLimit { limit: usize },
}

impl ConvertError {
    /// Returns the error of the hook, if this error came from one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vt_convert::ConvertError;
    ///
    /// let err = ConvertError::Hook("out of range".into());
    /// let hook_err = err.into_hook_error().unwrap();
    /// assert_eq!(hook_err.to_string(), "out of range");
    /// ```
    pub fn into_hook_error(self) -> Result<HookError, Self> {
        match self {
            Self::Hook(err) => Ok(err),
            other => Err(other),
        }
    }

    /// Returns `true` if the destination could not be written through.
    #[inline]
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, Self::InvalidTarget { .. })
    }
}

// -----------------------------------------------------------------------------
// Tests
