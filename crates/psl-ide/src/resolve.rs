//! Type resolution against the schema's declared blocks.

use psl_syntax::{Block, BlockKind, Field, Schema};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::capabilities::ScalarType;

/// What a field's type name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType<'s> {
    /// A built-in scalar.
    Scalar(ScalarType),
    /// A declared enum.
    Enum(&'s Block),
    /// A declared model or view.
    Model(&'s Block),
    /// A declared composite type.
    Composite(&'s Block),
    /// `Unsupported("...")`.
    Unsupported,
    /// No type, or a name nothing declares.
    Unknown,
}

impl<'s> ResolvedType<'s> {
    /// Resolves a type name.
    #[must_use]
    pub fn of_name(schema: &'s Schema, name: &str) -> Self {
        if let Some(scalar) = ScalarType::from_name(name) {
            return Self::Scalar(scalar);
        }
        if name == "Unsupported" {
            return Self::Unsupported;
        }
        match schema.type_block(name) {
            Some(block) if block.kind == BlockKind::Enum => Self::Enum(block),
            Some(block) if block.kind == BlockKind::CompositeType => Self::Composite(block),
            Some(block) if block.kind.is_model_like() => Self::Model(block),
            _ => Self::Unknown,
        }
    }

    /// Resolves the declared type of `field`.
    #[must_use]
    pub fn of_field(schema: &'s Schema, field: &Field) -> Self {
        field
            .type_name()
            .map_or(Self::Unknown, |name| Self::of_name(schema, name))
    }

    /// The scalar, if this is one.
    #[must_use]
    pub fn scalar(self) -> Option<ScalarType> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns `true` for model and view types.
    #[must_use]
    pub fn is_relation(self) -> bool {
        matches!(self, Self::Model(_))
    }

    /// Returns `true` for composite types.
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Composite(_))
    }
}

/// Follows a dotted path of composite-typed fields starting at `root`.
///
/// Returns the composite type the last segment refers to, or `None` when a
/// segment names no field, a field that is not composite, or a type already
/// visited along the path.
#[must_use]
pub fn resolve_path<'s>(
    schema: &'s Schema,
    root: &'s Block,
    path: &[SmolStr],
) -> Option<&'s Block> {
    let mut visited = FxHashSet::default();
    let mut current = root;
    for segment in path {
        let field = current.field(segment)?;
        let ResolvedType::Composite(next) = ResolvedType::of_field(schema, field) else {
            return None;
        };
        if !visited.insert(next.name.clone()) {
            return None;
        }
        current = next;
    }
    Some(current)
}
