use super::Descriptor;
use crate::Model;

use tether_core::{
    schema::app::FieldId,
    stmt::{Expr, Value, ValueRecord},
    Error, Result,
};

/// Copies the base value's key fields into the related value's matching
/// fields.
///
/// Only the relation's key fields of `related` change. If any field cannot
/// take its value, fields already copied are restored and the error is
/// returned.
pub fn project_to_related<M: Model, T: Model>(
    descriptor: &Descriptor,
    base: &M,
    related: &mut T,
) -> Result<()> {
    direct(descriptor)?;
    copy_fields(
        base,
        &descriptor.base_fields(),
        related,
        &descriptor.related_fields(),
    )
}

/// Copies the related value's key fields into the base value's matching
/// fields. The inverse of [`project_to_related`].
pub fn project_to_base<M: Model, T: Model>(
    descriptor: &Descriptor,
    base: &mut M,
    related: &T,
) -> Result<()> {
    direct(descriptor)?;
    copy_fields(
        related,
        &descriptor.related_fields(),
        base,
        &descriptor.base_fields(),
    )
}

/// `related key columns = base key values`, or `None` when a base key value
/// is null and so no related row can match.
pub(crate) fn related_filter<M: Model, T: Model>(
    descriptor: &Descriptor,
    base: &M,
) -> Result<Option<Expr>> {
    if descriptor.base_values(base).iter().any(Value::is_null) {
        return Ok(None);
    }

    let mut related = T::default();
    project_to_related(descriptor, base, &mut related)?;

    Ok(Some(Expr::key_eq(
        &descriptor.related_field_names(),
        &descriptor.related_values(&related),
    )))
}

/// Puts back key values saved before a projection whose write failed.
pub(crate) fn restore<M: Model>(model: &mut M, fields: &[FieldId], saved: &ValueRecord) {
    for (field, value) in fields.iter().zip(saved.iter()) {
        // Restoring a value the field held before cannot fail
        let _ = model.set_field(field.index, value.clone());
    }
}

fn direct(descriptor: &Descriptor) -> Result<()> {
    if descriptor.relation().is_many_to_many() {
        return Err(Error::invalid_schema(format!(
            "relation `{}` links through a join table and has no key fields to copy",
            descriptor.label()
        )));
    }

    Ok(())
}

fn copy_fields<S: Model, D: Model>(
    src: &S,
    src_fields: &[FieldId],
    dst: &mut D,
    dst_fields: &[FieldId],
) -> Result<()> {
    debug_assert_eq!(src_fields.len(), dst_fields.len());

    let values: Vec<_> = src_fields
        .iter()
        .map(|field| src.get_field(field.index))
        .collect();

    let saved: Vec<_> = dst_fields
        .iter()
        .map(|field| dst.get_field(field.index))
        .collect();

    for (i, (field, value)) in dst_fields.iter().zip(values).enumerate() {
        if let Err(err) = dst.set_field(field.index, value) {
            for (field, value) in dst_fields[..i].iter().zip(saved) {
                // Restoring a value the field held before cannot fail
                let _ = dst.set_field(field.index, value);
            }

            return Err(err);
        }
    }

    Ok(())
}
