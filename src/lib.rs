//! # dtomapper
//!
//! **dtomapper** builds typed, validated data transfer objects from untyped
//! key-value input such as decoded JSON bodies, query strings and form data.
//!
//! ## Overview
//!
//! Each DTO type declares its schema once through [`DataTransferObject`]: the
//! properties it has, their declared types, and for mapped properties the
//! external field name, the converter and whether the field is required. The
//! [`DtoEngine`] turns a map into a [`Dto`] by normalizing keys, converting each
//! mapped field and checking the result against the declared type.
//!
//! ## Architecture
//!
//! - **[`value`]** - The dynamic [`Value`] carried through construction
//! - **[`schema`]** - Type descriptors and the bounded descriptor cache
//! - **[`converters`]** - Built-in and user converters, and their registry
//! - **[`engine`]** - Construction, validation and the [`Dto`] instance
//! - **[`request`]** - Binding from HTTP-like requests
//! - **[`cast`]** - Encoding and decoding DTOs for storage
//! - **[`runtime_config`]** - [`DtoConfig`] from YAML and `DTO_*` variables
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`generator`]** / **[`cli`]** - The `dtomapper-gen` scaffolding tool
//!
//! ### Construction Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Engine as DtoEngine
//!     participant Cache as DescriptorCache
//!     participant Registry as ConverterRegistry
//!     participant Conv as TypeConverter
//!
//!     Caller->>Engine: construct::<T>(map)
//!     Engine->>Engine: normalize keys, drop ""
//!     Engine->>Cache: get_or_describe(T)
//!     Cache-->>Engine: Arc<TypeDescriptor>
//!     loop each mapped property
//!         Engine->>Engine: required check
//!         Engine->>Registry: resolve_for(property)
//!         Registry-->>Engine: Arc<dyn TypeConverter>
//!         Engine->>Conv: convert(value)
//!         Conv-->>Engine: Value
//!         Engine->>Engine: check declared type
//!     end
//!     Engine-->>Caller: Dto
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dtomapper::converters::{ConverterKind, ConverterSpec};
//! use dtomapper::{DataTransferObject, DeclaredType, DtoEngine, FieldSpec, TypeDescriptor, Value};
//! use serde_json::json;
//!
//! struct AddressDto;
//!
//! impl DataTransferObject for AddressDto {
//!     const NAME: &'static str = "AddressDto";
//!
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>()
//!             .field("city", DeclaredType::string(), FieldSpec::new("city", ConverterKind::String.into()))
//!             .build()
//!     }
//! }
//!
//! struct SignupDto;
//!
//! impl DataTransferObject for SignupDto {
//!     const NAME: &'static str = "SignupDto";
//!
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>()
//!             .field(
//!                 "userId",
//!                 DeclaredType::int(),
//!                 FieldSpec::new("userId", ConverterKind::Int.into()).required(),
//!             )
//!             .field(
//!                 "address",
//!                 DeclaredType::dto::<AddressDto>().nullable(),
//!                 FieldSpec::new("address", ConverterSpec::Dto),
//!             )
//!             .build()
//!     }
//! }
//!
//! let engine = DtoEngine::default();
//! let dto = engine
//!     .construct_json::<SignupDto>(json!({"user_id": "42", "address": {"city": "Oslo"}}))
//!     .unwrap();
//!
//! assert_eq!(dto.get("userId"), Some(&Value::Int(42)));
//! assert_eq!(
//!     dto.to_json(),
//!     json!({"userId": 42, "address": {"city": "Oslo"}})
//! );
//! ```
//!
//! ## Configuration
//!
//! The engine reads [`DtoConfig`] once at registry creation. Share one registry
//! per process:
//!
//! ```rust,no_run
//! use dtomapper::{DtoConfig, DtoEngine};
//!
//! let config = DtoConfig::load("config/dto.yaml")?;
//! let engine = DtoEngine::from_config(config);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cast;
pub mod cli;
pub mod converters;
pub mod engine;
pub mod error;
pub mod generator;
pub mod logging;
pub mod normalize;
pub mod request;
pub mod runtime_config;
pub mod schema;
pub mod value;

pub use cast::DtoCast;
pub use engine::{Dto, DtoEngine, DtoRegistry};
pub use error::{DtoError, ErrorKind};
pub use normalize::normalize;
pub use request::{merge_request, ParsedRequest, RequestSource};
pub use runtime_config::DtoConfig;
pub use schema::{DataTransferObject, DeclaredType, DtoRef, FieldSpec, TypeDescriptor, TypeKind};
pub use value::{FromValue, Map, Value};
