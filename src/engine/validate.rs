use crate::error::DtoError;
use crate::schema::{Property, TypeDescriptor, TypeKind};
use crate::value::Value;

/// Check a converted value against the property's declared type.
///
/// `null` passes only for nullable declarations. Any other value must match
/// the declared kind exactly; untyped (`Mixed`) properties are never checked.
pub(crate) fn check(
    descriptor: &TypeDescriptor,
    property: &Property,
    value: &Value,
) -> Result<(), DtoError> {
    let declared = property.declared();
    if declared.kind() == TypeKind::Mixed {
        return Ok(());
    }
    if value.is_null() {
        return if declared.is_nullable() {
            Ok(())
        } else {
            Err(DtoError::NullNotAllowed {
                dto: descriptor.name(),
                property: property.name(),
            })
        };
    }
    if declared.kind().accepts(value) {
        Ok(())
    } else {
        Err(DtoError::TypeMismatch {
            dto: descriptor.name(),
            property: property.name(),
            expected: declared.kind().name().to_string(),
            actual: value.type_name().to_string(),
        })
    }
}
