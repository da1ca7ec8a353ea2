//! # Generator Module
//!
//! Scaffolding for new DTO types.
//!
//! `dtomapper-gen make <Name>` writes a source file containing an empty
//! [`DataTransferObject`](crate::DataTransferObject) implementation:
//!
//! ```text
//! dtomapper-gen make UserDto                  -> src/dto/user_dto.rs
//! dtomapper-gen make Order/CreateOrderDto     -> src/dto/order/create_order_dto.rs
//! dtomapper-gen make order::CreateOrderDto --dir crates/api/src/dto --force
//! ```
//!
//! The skeleton is a `minijinja` template with `name` and `module` in scope.
//! A `stubs/dto.stub` file in the working directory replaces the built-in one.

mod dto;
mod templates;

pub use dto::{make_dto, DtoTarget, MakeOptions};
pub use templates::{render_stub, DtoStubContext, DEFAULT_DTO_STUB};
