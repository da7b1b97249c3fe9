use alloc::boxed::Box;

use vt_reflect::Reflect;
use vt_reflect::info::ReflectKind;
use vt_reflect::ops::List;

use crate::ConvertError;
use crate::converter::{ConvertContext, convert_value};
use crate::resolve::{probe, resolve};

/// Refills `destination` with the converted items of `source`.
///
/// - Same item types: every item is cloned.
/// - Destination items resolving to a struct, a list, or the resolved
///   source item type: every item is converted into a fresh zero-valued
///   item, an absent source item stays zero-valued.
/// - Otherwise the destination is left untouched.
pub(crate) fn convert_list(
    cx: &mut ConvertContext,
    source: &dyn List,
    destination: &mut dyn List,
) -> Result<(), ConvertError> {
    if source.item_ty() == destination.item_ty() {
        destination.clear();
        for item in source.iter() {
            push(destination, item.reflect_clone()?)?;
        }
        return Ok(());
    }

    let source_item = probe(&*source.new_item(), |resolved| resolved.ty_id());
    let convertible = probe(&*destination.new_item(), |resolved| {
        matches!(resolved.reflect_kind(), ReflectKind::Struct | ReflectKind::List)
            || resolved.ty_id() == source_item
    });
    if !convertible {
        log::debug!(
            "skip list: cannot convert items `{}` into `{}`",
            source.item_ty(),
            destination.item_ty()
        );
        return Ok(());
    }

    destination.clear();
    for item in source.iter() {
        let mut converted = destination.new_item();
        if resolve(item).is_some() {
            convert_value(cx, item, &mut *converted)?;
        }
        push(destination, converted)?;
    }
    Ok(())
}

fn push(destination: &mut dyn List, item: Box<dyn Reflect>) -> Result<(), ConvertError> {
    destination
        .push(item)
        .map_err(|item| ConvertError::Unsupported {
            from: item.reflect_kind(),
            from_type: item.reflect_type_path(),
            to: destination.new_item().reflect_kind(),
            to_type: destination.item_ty().path(),
        })
}
