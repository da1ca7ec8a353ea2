use crate::converters::ConverterSpec;
use crate::value::Value;
use std::any::TypeId;
use std::fmt;

/// A type that can be constructed by the [`DtoEngine`](crate::engine::DtoEngine).
///
/// Implementors are usually unit marker types; the instance itself is a
/// [`Dto`](crate::engine::Dto) carrying the converted fields.
///
/// ```rust
/// use dtomapper::converters::{ConverterKind, ConverterSpec};
/// use dtomapper::schema::{DataTransferObject, DeclaredType, FieldSpec, TypeDescriptor};
///
/// struct SignupDto;
///
/// impl DataTransferObject for SignupDto {
///     const NAME: &'static str = "SignupDto";
///
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>()
///             .field(
///                 "email",
///                 DeclaredType::string(),
///                 FieldSpec::new("email", ConverterSpec::Kind(ConverterKind::String)).required(),
///             )
///             .build()
///     }
/// }
/// ```
pub trait DataTransferObject: 'static {
    /// Type name used in error messages and nominal type checks
    const NAME: &'static str;

    /// Static schema of this type. Called once per type; the result is cached.
    fn describe() -> TypeDescriptor;
}

/// Copyable handle to a [`DataTransferObject`] type.
#[derive(Clone, Copy)]
pub struct DtoRef {
    type_id: TypeId,
    name: &'static str,
    describe: fn() -> TypeDescriptor,
}

impl DtoRef {
    pub fn of<T: DataTransferObject>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
            describe: T::describe,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn describe(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

impl fmt::Debug for DtoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DtoRef").field(&self.name).finish()
    }
}

impl PartialEq for DtoRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DtoRef {}

/// Closed set of property types a DTO may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Untyped property, never checked
    Mixed,
    Bool,
    Int,
    Float,
    String,
    /// List or map
    Array,
    Collection,
    Date,
    Fluent,
    Dto(DtoRef),
    /// Nominal type produced by a user-defined converter
    Tagged(&'static str),
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Mixed => "mixed",
            TypeKind::Bool => "bool",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::String => "string",
            TypeKind::Array => "array",
            TypeKind::Collection => "Collection",
            TypeKind::Date => "Date",
            TypeKind::Fluent => "Fluent",
            TypeKind::Dto(target) => target.name(),
            TypeKind::Tagged(tag) => *tag,
        }
    }

    /// Exact nominal match of a non-null value. No widening: `Int` is not a `Float`.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeKind::Mixed, _) => true,
            (TypeKind::Bool, Value::Bool(_))
            | (TypeKind::Int, Value::Int(_))
            | (TypeKind::Float, Value::Float(_))
            | (TypeKind::String, Value::String(_))
            | (TypeKind::Array, Value::List(_) | Value::Map(_))
            | (TypeKind::Collection, Value::Collection(_))
            | (TypeKind::Date, Value::Date(_))
            | (TypeKind::Fluent, Value::Fluent(_)) => true,
            (TypeKind::Dto(target), Value::Dto(dto)) => dto.type_id() == target.type_id(),
            (TypeKind::Tagged(tag), Value::Tagged(tagged)) => tagged.tag() == *tag,
            _ => false,
        }
    }
}

/// Declared type of a property: a [`TypeKind`] plus nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredType {
    kind: TypeKind,
    nullable: bool,
}

impl DeclaredType {
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Allow `null` for this property.
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn mixed() -> Self {
        Self::new(TypeKind::Mixed).nullable()
    }

    pub const fn bool() -> Self {
        Self::new(TypeKind::Bool)
    }

    pub const fn int() -> Self {
        Self::new(TypeKind::Int)
    }

    pub const fn float() -> Self {
        Self::new(TypeKind::Float)
    }

    pub const fn string() -> Self {
        Self::new(TypeKind::String)
    }

    pub const fn array() -> Self {
        Self::new(TypeKind::Array)
    }

    pub const fn collection() -> Self {
        Self::new(TypeKind::Collection)
    }

    pub const fn date() -> Self {
        Self::new(TypeKind::Date)
    }

    pub const fn fluent() -> Self {
        Self::new(TypeKind::Fluent)
    }

    pub fn dto<T: DataTransferObject>() -> Self {
        Self::new(TypeKind::Dto(DtoRef::of::<T>()))
    }

    pub const fn tagged(tag: &'static str) -> Self {
        Self::new(TypeKind::Tagged(tag))
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Per-property binding of an external key and converter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    external_name: &'static str,
    converter: ConverterSpec,
    required: bool,
}

impl FieldSpec {
    pub fn new(external_name: &'static str, converter: ConverterSpec) -> Self {
        Self {
            external_name,
            converter,
            required: false,
        }
    }

    /// Field with the identity converter.
    pub fn dynamic(external_name: &'static str) -> Self {
        Self::new(external_name, ConverterSpec::default())
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn external_name(&self) -> &'static str {
        self.external_name
    }

    pub fn converter(&self) -> &ConverterSpec {
        &self.converter
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: &'static str,
    declared: DeclaredType,
    field: Option<FieldSpec>,
}

impl Property {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    pub fn field(&self) -> Option<&FieldSpec> {
        self.field.as_ref()
    }
}

/// Static description of one DTO type: its properties in enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    type_id: TypeId,
    name: &'static str,
    properties: Vec<Property>,
}

impl TypeDescriptor {
    /// Start describing `T`.
    pub fn of<T: DataTransferObject>() -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
            properties: Vec::new(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

pub struct TypeDescriptorBuilder {
    type_id: TypeId,
    name: &'static str,
    properties: Vec<Property>,
}

impl TypeDescriptorBuilder {
    /// Mapped property.
    pub fn field(mut self, name: &'static str, declared: DeclaredType, field: FieldSpec) -> Self {
        self.push(Property {
            name,
            declared,
            field: Some(field),
        });
        self
    }

    /// Property without a field binding. It is never assigned by construction.
    pub fn property(mut self, name: &'static str, declared: DeclaredType) -> Self {
        self.push(Property {
            name,
            declared,
            field: None,
        });
        self
    }

    // Redeclaring a property replaces it in place.
    fn push(&mut self, property: Property) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            type_id: self.type_id,
            name: self.name,
            properties: self.properties,
        }
    }
}
