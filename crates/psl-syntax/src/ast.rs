//! Structural model of a parsed schema document.
//!
//! The model is deliberately shallow: blocks with their fields, enum values,
//! key/value properties and attributes. Every node keeps the byte range it
//! was parsed from so that editor features can map positions back to it.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// Keyword that introduces a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `datasource db { ... }`
    Datasource,
    /// `generator client { ... }`
    Generator,
    /// `model User { ... }`
    Model,
    /// `view UserInfo { ... }`
    View,
    /// `enum Role { ... }`
    Enum,
    /// `type Address { ... }`, a composite type
    CompositeType,
}

impl BlockKind {
    /// Parses a block keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "datasource" => Some(Self::Datasource),
            "generator" => Some(Self::Generator),
            "model" => Some(Self::Model),
            "view" => Some(Self::View),
            "enum" => Some(Self::Enum),
            "type" => Some(Self::CompositeType),
            _ => None,
        }
    }

    /// The keyword that introduces this kind of block.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Datasource => "datasource",
            Self::Generator => "generator",
            Self::Model => "model",
            Self::View => "view",
            Self::Enum => "enum",
            Self::CompositeType => "type",
        }
    }

    /// Blocks whose body is a list of `key = value` properties.
    #[must_use]
    pub fn is_configuration(self) -> bool {
        matches!(self, Self::Datasource | Self::Generator)
    }

    /// Models and views share their body grammar and attribute rules.
    #[must_use]
    pub fn is_model_like(self) -> bool {
        matches!(self, Self::Model | Self::View)
    }

    /// Blocks whose name can be used as a field type.
    #[must_use]
    pub fn declares_type(self) -> bool {
        matches!(
            self,
            Self::Model | Self::View | Self::Enum | Self::CompositeType
        )
    }
}

/// A top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block keyword.
    pub kind: BlockKind,
    /// Declared name.
    pub name: SmolStr,
    /// From the keyword to the closing brace, or to where the next block
    /// starts when the brace is missing.
    pub range: TextRange,
    /// Everything between the braces.
    pub body: TextRange,
    /// Whether a closing brace was found.
    pub closed: bool,
    /// Fields of models, views and composite types.
    pub fields: Vec<Field>,
    /// Values of an enum.
    pub values: Vec<EnumValue>,
    /// `key = value` lines of datasources and generators.
    pub properties: Vec<Property>,
    /// `@@` attributes.
    pub attributes: Vec<Attribute>,
}

impl Block {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field whose line range contains `offset`.
    #[must_use]
    pub fn field_at(&self, offset: TextSize) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.range.contains_inclusive(offset))
    }

    /// Enum value whose range contains `offset`.
    #[must_use]
    pub fn value_at(&self, offset: TextSize) -> Option<&EnumValue> {
        self.values
            .iter()
            .find(|value| value.range.contains_inclusive(offset))
    }

    /// Block attribute whose range contains `offset`.
    #[must_use]
    pub fn attribute_at(&self, offset: TextSize) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.range.contains_inclusive(offset))
    }

    /// Looks up a property by key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.key == key)
    }

    /// Value of a property when it is a string literal.
    #[must_use]
    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.property(key)?.value.as_ref()?.as_str()
    }

    /// Returns `true` if the block carries `@@name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }

    /// All `@@name` attributes on the block.
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> {
        self.attributes
            .iter()
            .filter(move |attribute| attribute.name == name)
    }
}

/// Arity marker on a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldArity {
    /// `Int`
    #[default]
    Required,
    /// `Int?`
    Optional,
    /// `Int[]`
    List,
}

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// Type name, e.g. `String` or the name of another block.
    pub name: SmolStr,
    /// Optional or list marker.
    pub arity: FieldArity,
    /// Range of the type name and its markers.
    pub range: TextRange,
}

/// A field of a model, view or composite type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: SmolStr,
    /// Declared type, missing while the user is still typing the line.
    pub ty: Option<FieldType>,
    /// `@` attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Range of the whole statement.
    pub range: TextRange,
}

impl Field {
    /// Name of the declared type, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.ty.as_ref().map(|ty| ty.name.as_str())
    }

    /// Returns `true` if the type is a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.ty
            .as_ref()
            .is_some_and(|ty| ty.arity == FieldArity::List)
    }

    /// Looks up an attribute by its name without the `@`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Returns `true` if the field carries `@name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Native type from a `@db.X` attribute, without the `db.` prefix.
    #[must_use]
    pub fn native_type(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find_map(|attribute| attribute.name.strip_prefix("db."))
    }

    /// Field attribute whose range contains `offset`.
    #[must_use]
    pub fn attribute_at(&self, offset: TextSize) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.range.contains_inclusive(offset))
    }
}

/// A value of an enum block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Value name.
    pub name: SmolStr,
    /// `@` attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Range of the whole statement.
    pub range: TextRange,
}

impl EnumValue {
    /// Returns `true` if the value carries `@name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }
}

/// A `key = value` line inside a datasource or generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property key.
    pub key: SmolStr,
    /// Assigned value, missing after a bare key or a dangling `=`.
    pub value: Option<Expr>,
    /// Range of the whole statement.
    pub range: TextRange,
}

/// A `@name(...)` or `@@name(...)` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name without the leading `@`/`@@`, dotted for native types (`db.VarChar`).
    pub name: SmolStr,
    /// `true` for `@@` attributes.
    pub block_level: bool,
    /// Arguments, empty when there are no parentheses.
    pub arguments: Vec<Argument>,
    /// From the `@` to the closing parenthesis.
    pub range: TextRange,
}

impl Attribute {
    /// Looks up a named argument.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|argument| argument.name.as_deref() == Some(name))
    }

    /// First argument without a name.
    #[must_use]
    pub fn positional(&self) -> Option<&Argument> {
        self.arguments.iter().find(|argument| argument.name.is_none())
    }
}

/// One argument of an attribute or function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Name for `name: value` arguments.
    pub name: Option<SmolStr>,
    /// The value, [`Expr::Missing`] after a dangling `name:`.
    pub value: Expr,
    /// Range covering the name and the value.
    pub range: TextRange,
}

/// A value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// String literal, without quotes.
    String(SmolStr),
    /// Numeric literal as written.
    Number(SmolStr),
    /// Identifier or dotted path.
    Path(SmolStr),
    /// Function call such as `env("URL")` or `title(ops: raw)`.
    Call {
        /// Callee path.
        name: SmolStr,
        /// Call arguments.
        arguments: Vec<Argument>,
    },
    /// `[a, b]`
    Array(Vec<Expr>),
    /// Nothing usable at this place.
    Missing,
}

impl Expr {
    /// The contents of a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// The identifier of a path expression.
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Items of an array literal.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Expr]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// String items of an array literal, skipping everything else.
    pub fn string_items(&self) -> impl Iterator<Item = &str> {
        self.as_array()
            .unwrap_or_default()
            .iter()
            .filter_map(Expr::as_str)
    }

    /// The name an item of a field list refers to: a path or a call head.
    #[must_use]
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Self::Path(path) | Self::Call { name: path, .. } => Some(path),
            _ => None,
        }
    }
}
