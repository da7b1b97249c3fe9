use vt_reflect::Reflect;
use vt_reflect::info::{ReflectKind, Type};
use vt_reflect::ops::{ReflectMut, ReflectRef};

use crate::ConvertError;
use crate::fields::{convert_struct, copy_value};
use crate::hook::{dispatch_convert_from, dispatch_convert_to};
use crate::resolve::{ensure_writable, probe_mut, resolve, resolve_mut};
use crate::sequence::convert_list;

// -----------------------------------------------------------------------------
// ConvertOptions

/// Runtime options of a [`Converter`].
///
/// # Examples
///
/// ```
/// use vt_convert::{ConvertOptions, Converter};
///
/// let converter = Converter::with_options(ConvertOptions::new().with_max_depth(16));
/// assert_eq!(converter.options().max_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// The maximum number of nested values a conversion may enter.
    ///
    /// Exceeding it fails with [`ConvertError::DepthLimit`].
    pub max_depth: usize,
}

impl ConvertOptions {
    /// The default [`max_depth`](Self::max_depth).
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ConvertOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// ConvertContext

/// The state of one conversion call.
pub(crate) struct ConvertContext {
    options: ConvertOptions,
    depth: usize,
}

impl ConvertContext {
    #[inline]
    const fn new(options: ConvertOptions) -> Self {
        Self { options, depth: 0 }
    }
}

// -----------------------------------------------------------------------------
// Converter

/// The conversion engine.
///
/// A `Converter` holds only its [`ConvertOptions`], so it is cheap to copy
/// and can be shared across threads.
///
/// # Rules
///
/// Both values are resolved through their indirections first. An absent
/// source converts to nothing and leaves the destination untouched. Then the
/// first matching rule applies:
///
/// 1. The source is a struct with a `ConvertTo` hook that handles the value.
/// 2. The destination is a struct with a `ConvertFrom` hook that handles the
///    value.
/// 3. Both are structs: the fields are matched by name, see [`fields`].
/// 4. Both are lists: the destination is refilled item by item.
/// 5. Both have the same type: the source is cloned into the destination.
///
/// Otherwise the conversion fails with [`ConvertError::Unsupported`].
///
/// Absent destination indirections are allocated only when a rule is about
/// to write through them.
///
/// [`fields`]: crate::fields
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Creates a converter with the default options.
    #[inline]
    pub const fn new() -> Self {
        Self {
            options: ConvertOptions::new(),
        }
    }

    #[inline]
    pub const fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub const fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts `source` into `destination`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidTarget`] if `destination` is behind a shared
    ///   indirection. Nothing is written in this case.
    /// - [`ConvertError::Unsupported`] if a value has no conversion rule.
    /// - [`ConvertError::Hook`] if a hook fails.
    ///
    /// There is no rollback: fields written before the error keep their
    /// new values.
    pub fn convert(
        &self,
        source: &dyn Reflect,
        destination: &mut dyn Reflect,
    ) -> Result<(), ConvertError> {
        ensure_writable(destination)?;
        let mut cx = ConvertContext::new(self.options);
        convert_value(&mut cx, source, destination)
    }

    /// Converts `source` into `destination`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics with the error message if the conversion fails.
    #[track_caller]
    pub fn must_convert(&self, source: &dyn Reflect, destination: &mut dyn Reflect) {
        if let Err(err) = self.convert(source, destination) {
            panic!("{err}");
        }
    }

    /// Converts `source` into a zero-valued `T`.
    pub fn convert_into<T: Reflect + Default>(&self, source: &dyn Reflect) -> Result<T, ConvertError> {
        let mut value = T::default();
        self.convert(source, &mut value)?;
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Entry points

/// Converts `source` into `destination` with the default options.
///
/// See [`Converter::convert`].
///
/// # Examples
///
/// ```
/// use vt_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// struct Celsius {
///     value: f64,
///     label: String,
/// }
///
/// #[derive(Reflect, Default)]
/// struct Reading {
///     value: Option<f64>,
///     label: String,
///     station: u32,
/// }
///
/// let source = Celsius { value: 21.5, label: "lab".into() };
/// let mut reading = Reading { station: 4, ..Default::default() };
/// vt_convert::convert(&source, &mut reading).unwrap();
///
/// assert_eq!(reading.value, Some(21.5));
/// assert_eq!(reading.label, "lab");
/// assert_eq!(reading.station, 4);
/// ```
#[inline]
pub fn convert(source: &dyn Reflect, destination: &mut dyn Reflect) -> Result<(), ConvertError> {
    Converter::new().convert(source, destination)
}

/// Converts `source` into `destination` with the default options,
/// panicking on failure.
///
/// See [`Converter::must_convert`].
#[inline]
#[track_caller]
pub fn must_convert(source: &dyn Reflect, destination: &mut dyn Reflect) {
    Converter::new().must_convert(source, destination);
}

/// Converts `source` into a zero-valued `T` with the default options.
///
/// See [`Converter::convert_into`].
#[inline]
pub fn convert_into<T: Reflect + Default>(source: &dyn Reflect) -> Result<T, ConvertError> {
    Converter::new().convert_into(source)
}

// -----------------------------------------------------------------------------
// Engine

/// What the destination resolves to, learned without allocating.
struct Shape {
    kind: ReflectKind,
    ty: Type,
}

/// Converts one value, the entry of every nested conversion.
pub(crate) fn convert_value(
    cx: &mut ConvertContext,
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
) -> Result<(), ConvertError> {
    if cx.depth >= cx.options.max_depth {
        return Err(ConvertError::DepthLimit {
            limit: cx.options.max_depth,
        });
    }

    cx.depth += 1;
    let result = convert_resolved(cx, source, destination);
    cx.depth -= 1;
    result
}

fn convert_resolved(
    cx: &mut ConvertContext,
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
) -> Result<(), ConvertError> {
    let Some(source) = resolve(source) else {
        log::debug!(
            "skip `{}`: source is absent",
            destination.reflect_type_path()
        );
        return Ok(());
    };

    crate::trace!(
        "convert `{}` -> `{}`",
        source.reflect_type_path(),
        destination.reflect_type_path()
    );

    if dispatch_convert_to(source, destination)? {
        return Ok(());
    }
    if dispatch_convert_from(source, destination)? {
        return Ok(());
    }

    let shape = probe_mut(destination, |resolved| Shape {
        kind: resolved.reflect_kind(),
        ty: resolved.reflect_type(),
    });

    match (source.reflect_ref(), shape.kind) {
        (ReflectRef::Struct(from), ReflectKind::Struct) => {
            if let ReflectMut::Struct(to) = resolve_mut(destination)?.reflect_mut() {
                return convert_struct(cx, from, to);
            }
        }
        (ReflectRef::List(from), ReflectKind::List) => {
            if let ReflectMut::List(to) = resolve_mut(destination)?.reflect_mut() {
                return convert_list(cx, from, to);
            }
        }
        _ => {}
    }

    if source.ty_id() == shape.ty.id() {
        return copy_value(source, resolve_mut(destination)?);
    }

    Err(ConvertError::Unsupported {
        from: source.reflect_kind(),
        from_type: source.reflect_type_path(),
        to: shape.kind,
        to_type: shape.ty.path(),
    })
}
