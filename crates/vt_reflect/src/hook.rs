//! Conversion hooks: per-type overrides of the generic conversion.
//!
//! A type offers a hook by implementing [`ConvertTo`] and/or [`ConvertFrom`]
//! and flagging it in the derive:
//!
//! ```
//! use vt_reflect::{Reflect, derive::Reflect};
//! use vt_reflect::hook::{ConvertTo, HookError};
//!
//! #[derive(Reflect, Default)]
//! #[reflect(convert_to)]
//! struct Celsius {
//!     degrees: f64,
//! }
//!
//! impl ConvertTo for Celsius {
//!     fn convert_to(&self, target: &mut dyn Reflect) -> Result<bool, HookError> {
//!         match target.downcast_mut::<f64>() {
//!             Some(out) => {
//!                 *out = self.degrees * 1.8 + 32.0;
//!                 Ok(true)
//!             }
//!             None => Ok(false),
//!         }
//!     }
//! }
//!
//! let c = Celsius { degrees: 100.0 };
//! let mut f = 0.0_f64;
//! let hook = c.reflect_convert_to().unwrap();
//! assert!(hook.convert_to(&mut f).unwrap());
//! assert_eq!(f, 212.0);
//! ```
//!
//! The hooks see resolved values: indirections on both sides are followed
//! before a hook is called.

use alloc::boxed::Box;

use crate::Reflect;

/// The error type returned by a hook.
///
/// Conversion passes it through unchanged, so callers can downcast it back
/// to the concrete error the hook produced.
pub type HookError = Box<dyn core::error::Error + Send + Sync>;

/// Source-side hook: the type knows how to write itself into a destination.
pub trait ConvertTo {
    /// Converts `self` into `target`.
    ///
    /// Returns `Ok(true)` if the value was handled, `Ok(false)` to fall back
    /// to the generic conversion.
    fn convert_to(&self, target: &mut dyn Reflect) -> Result<bool, HookError>;
}

/// Destination-side hook: the type knows how to fill itself from a source.
pub trait ConvertFrom {
    /// Fills `self` from `source`.
    ///
    /// Returns `Ok(true)` if the value was handled, `Ok(false)` to fall back
    /// to the generic conversion.
    fn convert_from(&mut self, source: &dyn Reflect) -> Result<bool, HookError>;
}
