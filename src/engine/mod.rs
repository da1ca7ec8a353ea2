//! # Engine Module
//!
//! Construction of DTO instances from untyped maps.
//!
//! A [`DtoRegistry`] owns the descriptor cache, the converter caches and the
//! configuration. Create it once at startup and hand out [`DtoEngine`] handles;
//! cloning an engine only bumps a reference count.
//!
//! ## Construction
//!
//! 1. The raw input is kept verbatim.
//! 2. Keys are normalized (`userId` becomes `user_id`) and empty strings are
//!    dropped, so `""` reads the same as an absent field.
//! 3. The type descriptor is fetched from the cache or built.
//! 4. Every mapped property, in declaration order, is checked for presence,
//!    converted, type checked and assigned.
//!
//! The first failure aborts the whole construction.
//!
//! ```rust
//! use dtomapper::{DataTransferObject, DeclaredType, DtoEngine, FieldSpec, TypeDescriptor};
//! use dtomapper::converters::ConverterKind;
//! use serde_json::json;
//!
//! struct PingDto;
//!
//! impl DataTransferObject for PingDto {
//!     const NAME: &'static str = "PingDto";
//!
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>()
//!             .field(
//!                 "count",
//!                 DeclaredType::int(),
//!                 FieldSpec::new("count", ConverterKind::Int.into()).required(),
//!             )
//!             .build()
//!     }
//! }
//!
//! let engine = DtoEngine::default();
//! let dto = engine.construct_json::<PingDto>(json!({"count": "3"})).unwrap();
//! assert_eq!(dto.value::<i64>("count"), Some(3));
//! ```

mod core;
mod dto;
mod validate;

pub use self::core::{DtoEngine, DtoRegistry};
pub use dto::Dto;
