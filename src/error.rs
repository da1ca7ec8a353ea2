use std::fmt;

/// Coarse classification of a [`DtoError`].
///
/// Request-binding callers map this onto their own error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequiredField,
    Conversion,
    TypeMismatch,
    UnsupportedConversionTarget,
    Decode,
}

/// Error aborting a DTO construction.
///
/// Construction is fail-fast: the first violated field stops processing and
/// no partially populated instance is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum DtoError {
    /// A required field's normalized name is absent from the input.
    MissingRequiredField {
        /// DTO type being constructed
        dto: &'static str,
        /// Property the field maps onto
        property: &'static str,
        /// External field name as declared
        field: &'static str,
    },
    /// A converter could not produce a value of its intended shape.
    Conversion {
        /// Converter that failed (e.g. `array`, `date`)
        converter: String,
        /// Property being converted, when known
        property: Option<&'static str>,
        /// Human readable reason
        message: String,
    },
    /// Converted value does not nominally match the declared property type.
    TypeMismatch {
        dto: &'static str,
        property: &'static str,
        expected: String,
        actual: String,
    },
    /// A `null` value was produced for a non-nullable property.
    NullNotAllowed {
        dto: &'static str,
        property: &'static str,
    },
    /// A nested-DTO field targets something that is not a DTO type, or the
    /// nested converter received a value it cannot turn into one.
    UnsupportedConversionTarget {
        /// Set when the property declaration itself is wrong
        property: Option<&'static str>,
        /// Target type name (the declared type for a bad declaration)
        target: String,
        /// Offending runtime type, or `dto marker` for a bad declaration
        actual: String,
    },
    /// A stored value could not be decoded back into construction input.
    Decode {
        target: &'static str,
        message: String,
    },
}

impl DtoError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DtoError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            DtoError::Conversion { .. } => ErrorKind::Conversion,
            // NullNotAllowed is a refinement of a type mismatch
            DtoError::TypeMismatch { .. } | DtoError::NullNotAllowed { .. } => {
                ErrorKind::TypeMismatch
            }
            DtoError::UnsupportedConversionTarget { .. } => {
                ErrorKind::UnsupportedConversionTarget
            }
            DtoError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub(crate) fn conversion(
        converter: impl Into<String>,
        property: Option<&'static str>,
        message: impl Into<String>,
    ) -> Self {
        DtoError::Conversion {
            converter: converter.into(),
            property,
            message: message.into(),
        }
    }
}

impl fmt::Display for DtoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DtoError::MissingRequiredField {
                dto,
                property,
                field,
            } => {
                write!(
                    f,
                    "Missing required field '{}' for property {}::{}",
                    field, dto, property
                )
            }
            DtoError::Conversion {
                converter,
                property: Some(property),
                message,
            } => {
                write!(
                    f,
                    "Conversion with '{}' failed for property {}: {}",
                    converter, property, message
                )
            }
            DtoError::Conversion {
                converter,
                property: None,
                message,
            } => write!(f, "Conversion with '{}' failed: {}", converter, message),
            DtoError::TypeMismatch {
                dto,
                property,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Property {}::{} expects {}, {} given",
                    dto, property, expected, actual
                )
            }
            DtoError::NullNotAllowed { dto, property } => {
                write!(f, "Property {}::{} does not allow null", dto, property)
            }
            DtoError::UnsupportedConversionTarget {
                property: Some(property),
                target,
                ..
            } => {
                write!(
                    f,
                    "Property {} uses the nested DTO converter but declares non-DTO type '{}'",
                    property, target
                )
            }
            DtoError::UnsupportedConversionTarget {
                property: None,
                target,
                actual,
            } => {
                write!(
                    f,
                    "Cannot convert value of type '{}' to DTO '{}'",
                    actual, target
                )
            }
            DtoError::Decode { target, message } => {
                write!(f, "Cannot decode stored value into '{}': {}", target, message)
            }
        }
    }
}

impl std::error::Error for DtoError {}
