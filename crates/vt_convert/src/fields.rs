//! Field mapping between two structs.
//!
//! Fields are matched by name. The fields of an embedded struct
//! (`#[reflect(embed)]`) are promoted into the enclosing struct:
//!
//! - the shallowest field with a name wins,
//! - two fields with the same name at the same shallowest depth are
//!   ambiguous and never matched,
//! - the embedding field itself is not matched by name.
//!
//! An embedded field whose value does not resolve to a struct is an
//! ordinary field.

use alloc::vec::Vec;
use core::any::TypeId;

use vt_reflect::Reflect;
use vt_reflect::hash::HashMap;
use vt_reflect::ops::{ReflectMut, ReflectRef, Struct};

use crate::ConvertError;
use crate::converter::{ConvertContext, convert_value};
use crate::resolve::{probe, resolve, resolve_mut};

// -----------------------------------------------------------------------------
// FieldDescriptor

/// One field of a flattened struct.
#[derive(Clone, Copy)]
pub struct FieldDescriptor<'a> {
    /// The field name.
    pub name: &'a str,
    /// The number of embedded structs between the root and the field.
    pub depth: usize,
    /// The unresolved field value.
    pub value: &'a dyn Reflect,
}

impl core::fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("depth", &self.depth)
            .field("value", &self.value)
            .finish()
    }
}

/// Flattens `source` into its matchable fields, in declaration order.
///
/// Embedded structs are expanded in place. Which names are shadowed by a
/// shallower field or ambiguous depends on the types only: an absent
/// embedded indirection contributes no fields, but its names still take
/// part. An embedded type is not re-entered below itself.
///
/// # Examples
///
/// ```
/// use vt_convert::fields::flatten;
/// use vt_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// struct Base {
///     id: u64,
///     note: String,
/// }
///
/// #[derive(Reflect, Default)]
/// struct Post {
///     #[reflect(embed)]
///     base: Base,
///     note: String,
/// }
///
/// let post = Post::default();
/// let names = flatten(&post).iter().map(|d| (d.name, d.depth)).collect::<Vec<_>>();
/// assert_eq!(names, [("id", 1), ("note", 0)]);
/// ```
pub fn flatten(source: &dyn Struct) -> Vec<FieldDescriptor<'_>> {
    let mut flat = Flattened {
        descriptors: Vec::with_capacity(source.field_len()),
        absent: Vec::new(),
        visited: Vec::new(),
    };
    flat.collect(source, 0);
    let Flattened {
        mut descriptors,
        absent,
        ..
    } = flat;

    // name -> (shallowest depth, fields at that depth)
    let mut table: HashMap<&str, (usize, usize)> = HashMap::default();
    for descriptor in &descriptors {
        let entry = table.entry(descriptor.name).or_insert((descriptor.depth, 0));
        count_name(entry, descriptor.depth);
    }
    for mut embedded in absent {
        probe(embedded.value, |resolved| {
            if let ReflectRef::Struct(detached) = resolved.reflect_ref() {
                shadow_names(&mut table, detached, embedded.depth, &mut embedded.visited);
            }
        });
    }

    descriptors.retain(|descriptor| {
        table
            .get(descriptor.name)
            .is_some_and(|&(depth, count)| depth == descriptor.depth && count == 1)
    });
    descriptors
}

fn count_name(entry: &mut (usize, usize), depth: usize) {
    if depth < entry.0 {
        *entry = (depth, 1);
    } else if depth == entry.0 {
        entry.1 += 1;
    }
}

/// An embedded struct field whose indirection is absent.
struct AbsentEmbedded<'a> {
    value: &'a dyn Reflect,
    depth: usize,
    visited: Vec<TypeId>,
}

struct Flattened<'a> {
    descriptors: Vec<FieldDescriptor<'a>>,
    absent: Vec<AbsentEmbedded<'a>>,
    visited: Vec<TypeId>,
}

impl<'a> Flattened<'a> {
    fn collect(&mut self, source: &'a dyn Struct, depth: usize) {
        self.visited.push(source.ty_id());

        for (index, value) in source.iter_fields().enumerate() {
            let Some(name) = source.name_at(index) else {
                continue;
            };

            if source.is_embedded_at(index) {
                match resolve(value).map(Reflect::reflect_ref) {
                    Some(ReflectRef::Struct(embedded)) => {
                        if !self.visited.contains(&embedded.ty_id()) {
                            self.collect(embedded, depth + 1);
                        }
                        continue;
                    }
                    Some(_) => {}
                    None => {
                        let embedded = probe(value, |resolved| match resolved.reflect_ref() {
                            ReflectRef::Struct(detached) => {
                                Some(!self.visited.contains(&detached.ty_id()))
                            }
                            _ => None,
                        });
                        if let Some(enter) = embedded {
                            if enter {
                                self.absent.push(AbsentEmbedded {
                                    value,
                                    depth: depth + 1,
                                    visited: self.visited.clone(),
                                });
                            }
                            continue;
                        }
                    }
                }
            }

            self.descriptors.push(FieldDescriptor { name, depth, value });
        }

        self.visited.pop();
    }
}

/// Counts the names of a detached embedded struct against `table`.
///
/// Only names already in `table` matter: the others have no value to copy.
fn shadow_names(
    table: &mut HashMap<&str, (usize, usize)>,
    source: &dyn Struct,
    depth: usize,
    visited: &mut Vec<TypeId>,
) {
    visited.push(source.ty_id());

    for (index, value) in source.iter_fields().enumerate() {
        let Some(name) = source.name_at(index) else {
            continue;
        };

        let embedded = source.is_embedded_at(index)
            && probe(value, |resolved| match resolved.reflect_ref() {
                ReflectRef::Struct(inner) => {
                    if !visited.contains(&inner.ty_id()) {
                        shadow_names(&mut *table, inner, depth + 1, &mut *visited);
                    }
                    true
                }
                _ => false,
            });

        if !embedded && let Some(entry) = table.get_mut(name) {
            count_name(entry, depth);
        }
    }

    visited.pop();
}

// -----------------------------------------------------------------------------
// Destination lookup

/// The field a source name maps to: the indices of the embedded fields
/// leading to it, then the field's own index.
struct Target {
    depth: usize,
    path: Vec<usize>,
    ambiguous: bool,
}

struct Lookup<'n> {
    targets: HashMap<&'n str, Option<Target>>,
    path: Vec<usize>,
    visited: Vec<TypeId>,
}

impl Lookup<'_> {
    fn record(&mut self, name: &str, index: usize, depth: usize) {
        let Some(slot) = self.targets.get_mut(name) else {
            return;
        };
        if let Some(target) = slot.as_mut() {
            if target.depth < depth {
                return;
            }
            if target.depth == depth {
                target.ambiguous = true;
                return;
            }
        }

        let mut path = self.path.clone();
        path.push(index);
        *slot = Some(Target {
            depth,
            path,
            ambiguous: false,
        });
    }

    fn walk(&mut self, destination: &dyn Struct, depth: usize) {
        self.visited.push(destination.ty_id());

        for (index, value) in destination.iter_fields().enumerate() {
            let Some(name) = destination.name_at(index) else {
                continue;
            };

            let embedded = destination.is_embedded_at(index)
                && probe(value, |resolved| match resolved.reflect_ref() {
                    ReflectRef::Struct(embedded) => {
                        if !self.visited.contains(&embedded.ty_id()) {
                            self.path.push(index);
                            self.walk(embedded, depth + 1);
                            self.path.pop();
                        }
                        true
                    }
                    _ => false,
                });

            if !embedded {
                self.record(name, index, depth);
            }
        }

        self.visited.pop();
    }
}

/// Walks down `path` from `destination`, allocating the embedded structs
/// on the way.
fn field_by_path<'a>(
    destination: &'a mut dyn Struct,
    path: &[usize],
) -> Result<Option<&'a mut dyn Reflect>, ConvertError> {
    let Some((&last, embedded)) = path.split_last() else {
        return Ok(None);
    };

    let mut current = destination;
    for &index in embedded {
        let Some(field) = current.field_at_mut(index) else {
            return Ok(None);
        };
        current = match resolve_mut(field)?.reflect_mut() {
            ReflectMut::Struct(inner) => inner,
            _ => return Ok(None),
        };
    }
    Ok(current.field_at_mut(last))
}

// -----------------------------------------------------------------------------
// Mapping

/// Copies the matching fields of `source` into `destination`.
pub(crate) fn convert_struct(
    cx: &mut ConvertContext,
    source: &dyn Struct,
    destination: &mut dyn Struct,
) -> Result<(), ConvertError> {
    let descriptors = flatten(source);

    let mut lookup = Lookup {
        targets: descriptors.iter().map(|d| (d.name, None)).collect(),
        path: Vec::new(),
        visited: Vec::new(),
    };
    lookup.walk(destination, 0);

    for descriptor in &descriptors {
        let Some(Some(target)) = lookup.targets.get(descriptor.name) else {
            log::debug!(
                "skip field `{}`: no counterpart in `{}`",
                descriptor.name,
                destination.reflect_type_path()
            );
            continue;
        };
        if target.ambiguous {
            log::debug!(
                "skip field `{}`: ambiguous in `{}`",
                descriptor.name,
                destination.reflect_type_path()
            );
            continue;
        }

        let Some(source_value) = resolve(descriptor.value) else {
            log::debug!("skip field `{}`: absent in source", descriptor.name);
            continue;
        };

        let Some(field) = field_by_path(destination, &target.path)? else {
            continue;
        };

        convert_field(cx, descriptor.value, source_value, field)?;
    }

    Ok(())
}

fn convert_field(
    cx: &mut ConvertContext,
    raw: &dyn Reflect,
    resolved: &dyn Reflect,
    field: &mut dyn Reflect,
) -> Result<(), ConvertError> {
    if raw.ty_id() == field.ty_id() {
        return copy_value(raw, field);
    }

    let same_resolved = probe(field, |target| target.ty_id() == resolved.ty_id());
    if same_resolved {
        return copy_value(resolved, resolve_mut(field)?);
    }

    convert_value(cx, raw, field)
}

/// Replaces `destination` by a clone of `source`, both of the same type.
pub(crate) fn copy_value(
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
) -> Result<(), ConvertError> {
    destination
        .set(source.reflect_clone()?)
        .map_err(|value| ConvertError::Unsupported {
            from: value.reflect_kind(),
            from_type: value.reflect_type_path(),
            to: destination.reflect_kind(),
            to_type: destination.reflect_type_path(),
        })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use vt_reflect::derive::Reflect;
    use vt_reflect::ops::DynamicStruct;

    use super::flatten;

    #[derive(Reflect, Default)]
    struct Inner {
        id: u32,
        name: String,
    }

    #[derive(Reflect, Default)]
    struct Other {
        id: u32,
    }

    #[derive(Reflect, Default)]
    struct Outer {
        #[reflect(embed)]
        inner: Inner,
        #[reflect(embed)]
        other: Option<Box<Other>>,
        name: String,
    }

    #[derive(Reflect, Default)]
    struct Wrapper {
        #[reflect(embed)]
        inner: Inner,
        name: String,
    }

    #[derive(Reflect, Default)]
    struct Layered {
        #[reflect(embed)]
        other: Option<Box<Other>>,
        #[reflect(embed)]
        wrapper: Wrapper,
    }

    #[derive(Reflect, Default)]
    struct Chain {
        id: u32,
        #[reflect(embed)]
        next: Option<Box<Chain>>,
    }

    fn names(value: &dyn vt_reflect::ops::Struct) -> Vec<(&str, usize)> {
        flatten(value).iter().map(|d| (d.name, d.depth)).collect()
    }

    #[test]
    fn shallowest_name_wins() {
        let wrapper = Wrapper::default();
        assert_eq!(names(&wrapper), [("id", 1), ("name", 0)]);
    }

    #[test]
    fn same_depth_names_are_ambiguous() {
        let absent = Outer::default();
        assert_eq!(names(&absent), [("name", 0)]);

        let present = Outer {
            other: Some(Box::new(Other { id: 2 })),
            ..Outer::default()
        };
        assert_eq!(names(&present), [("name", 0)]);
    }

    #[test]
    fn absent_embedded_names_still_shadow() {
        let layered = Layered::default();
        assert_eq!(names(&layered), [("name", 1)]);

        let layered = Layered {
            other: Some(Box::new(Other { id: 3 })),
            ..Layered::default()
        };
        assert_eq!(names(&layered), [("id", 1), ("name", 1)]);
    }

    #[test]
    fn embedded_types_are_not_reentered() {
        let chain = Chain {
            id: 1,
            next: Some(Box::new(Chain::default())),
        };
        assert_eq!(names(&chain), [("id", 0)]);
        assert_eq!(names(&Chain::default()), [("id", 0)]);
    }

    #[test]
    fn dynamic_struct_is_flat() {
        let mut dynamic = DynamicStruct::new();
        dynamic.insert("id", 1_u8);
        dynamic.insert("tags", Vec::<String>::new());
        assert_eq!(names(&dynamic), [("id", 0), ("tags", 0)]);
    }
}
