//! # Schema Module
//!
//! Statically declared DTO schemas and the bounded cache that holds them.
//!
//! Each DTO type implements [`DataTransferObject`] and describes its properties
//! with a [`TypeDescriptor`] builder. A property is a name plus a
//! [`DeclaredType`]; a mapped property also carries a [`FieldSpec`] naming the
//! external input key, the converter to apply, and whether the key is required.
//!
//! Descriptors are built once per type and kept in a [`DescriptorCache`], a FIFO
//! cache shared by every construction that runs through the same registry.

mod cache;
mod core;

pub use self::core::*;
pub use cache::{DescriptorCache, DEFAULT_DESCRIPTOR_CAPACITY};
