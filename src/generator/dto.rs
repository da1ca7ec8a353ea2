use super::templates::{render_stub, DtoStubContext, DEFAULT_DTO_STUB};
use crate::normalize::normalize;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A DTO to scaffold, parsed from user input such as `UserDto`,
/// `Order/CreateOrderDto`, `Order\CreateOrderDto` or `order::CreateOrderDto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoTarget {
    /// Type name
    pub name: String,
    /// Module directories below the DTO root, snake_case
    pub modules: Vec<String>,
}

impl DtoTarget {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let unified = input.replace("::", "/").replace('\\', "/");
        let mut segments: Vec<&str> = unified
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let Some(name) = segments.pop() else {
            bail!("DTO name is empty");
        };
        for segment in segments.iter().copied().chain(std::iter::once(name)) {
            if !is_identifier(segment) {
                bail!("'{}' is not a valid Rust identifier in '{}'", segment, input);
            }
        }
        if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
            bail!("DTO type name '{}' must start with an uppercase letter", name);
        }
        Ok(Self {
            name: name.to_string(),
            modules: segments.into_iter().map(normalize).collect(),
        })
    }

    /// Module path below the DTO root, e.g. `order::billing`.
    pub fn module_path(&self) -> String {
        self.modules.join("::")
    }

    /// Source file for this DTO below `root`.
    pub fn file_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.modules);
        path.push(format!("{}.rs", normalize(&self.name)));
        path
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Options of one `make` run.
#[derive(Debug, Clone)]
pub struct MakeOptions {
    pub name: String,
    /// DTO root directory
    pub dir: PathBuf,
    pub force: bool,
    /// Stub template overriding the built-in one when the file exists
    pub stub: PathBuf,
}

/// Write a DTO skeleton and return its path.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn make_dto(options: &MakeOptions) -> Result<PathBuf> {
    let target = DtoTarget::parse(&options.name)?;
    let path = target.file_path(&options.dir);

    if path.exists() && !options.force {
        bail!("DTO already exists: {}", path.display());
    }

    let stub = if options.stub.is_file() {
        fs::read_to_string(&options.stub)
            .with_context(|| format!("Failed to read stub {}", options.stub.display()))?
    } else {
        DEFAULT_DTO_STUB.to_string()
    };

    let ctx = DtoStubContext {
        name: target.name.clone(),
        module: target.module_path(),
    };
    let contents = render_stub(&stub, &ctx)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(dto = %target.name, path = %path.display(), "DTO created");
    Ok(path)
}
