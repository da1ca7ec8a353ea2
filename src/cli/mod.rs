//! # CLI Module
//!
//! Command-line interface of the `dtomapper-gen` binary.
//!
//! ## Commands
//!
//! ### `make`
//!
//! Create a new DTO source file:
//!
//! ```bash
//! dtomapper-gen make Order/CreateOrderDto
//! ```
//!
//! Options:
//! - `--dir <DIR>` - DTO root directory (default: `src/dto`)
//! - `--force` - Overwrite the file if it exists
//! - `--stub <FILE>` - Template overriding the built-in skeleton (default: `stubs/dto.stub`)
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use dtomapper::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
