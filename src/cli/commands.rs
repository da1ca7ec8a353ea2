use crate::generator::{make_dto, MakeOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for dtomapper
#[derive(Parser)]
#[command(name = "dtomapper-gen")]
#[command(about = "DTO scaffolding", long_about = None, version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new DTO type
    Make {
        /// Type name or path: UserDto, Order/CreateOrderDto, order::CreateOrderDto
        name: String,

        /// Overwrite the file if it exists
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// DTO root directory
        #[arg(long, default_value = "src/dto", env = "DTO_SCAFFOLD_DIR")]
        dir: PathBuf,

        /// Stub template; used only when the file exists
        #[arg(long, default_value = "stubs/dto.stub")]
        stub: PathBuf,
    },
}

/// Run a parsed command line.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Make {
            name,
            force,
            dir,
            stub,
        } => {
            let path = make_dto(&MakeOptions {
                name: name.clone(),
                dir,
                force,
                stub,
            })?;
            println!("DTO created successfully: {}", name);
            println!("Path: {}", path.display());
            Ok(())
        }
    }
}
