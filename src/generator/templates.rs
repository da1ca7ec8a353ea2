use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;

/// Built-in DTO skeleton.
pub const DEFAULT_DTO_STUB: &str = r#"use dtomapper::{DataTransferObject, TypeDescriptor};

pub struct {{ name }};

impl DataTransferObject for {{ name }} {
    const NAME: &'static str = "{{ name }}";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            // .field(
            //     "name",
            //     dtomapper::DeclaredType::string(),
            //     dtomapper::FieldSpec::new("name", dtomapper::converters::ConverterKind::String.into()),
            // )
            .build()
    }
}
"#;

/// Values available to a DTO stub.
#[derive(Debug, Clone, Serialize)]
pub struct DtoStubContext {
    /// Type name, e.g. `CreateOrderDto`
    pub name: String,
    /// Rust module path below the DTO root, e.g. `order`; empty at the root
    pub module: String,
}

/// Render a stub template.
pub fn render_stub(source: &str, ctx: &DtoStubContext) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("dto", source)
        .context("Invalid DTO stub template")?;
    let tmpl = env.get_template("dto").context("Missing DTO stub template")?;
    tmpl.render(ctx).context("Failed to render DTO stub")
}
