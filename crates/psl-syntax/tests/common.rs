//! Shared helpers for parser snapshot tests.
#![allow(dead_code, unused_imports)]

pub use psl_syntax::{Argument, Attribute, Block, Expr, FieldArity, Schema};

/// Helper to format a parsed schema for snapshot testing.
pub fn snapshot_schema(source: &str) -> String {
    let schema = Schema::single_file("file:///schema.prisma", source);

    let mut output = String::new();
    for block in schema.blocks() {
        format_block(block, &mut output);
    }
    output
}

fn format_block(block: &Block, out: &mut String) {
    out.push_str(&format!("{} {}", block.kind.keyword(), block.name));
    if !block.closed {
        out.push_str(" (unclosed)");
    }
    out.push('\n');

    for property in &block.properties {
        match &property.value {
            Some(value) => out.push_str(&format!(
                "  property {} = {}\n",
                property.key,
                format_expr(value)
            )),
            None => out.push_str(&format!("  property {}\n", property.key)),
        }
    }
    for field in &block.fields {
        let ty = match &field.ty {
            Some(ty) => {
                let marker = match ty.arity {
                    FieldArity::Required => "",
                    FieldArity::Optional => "?",
                    FieldArity::List => "[]",
                };
                format!("{}{}", ty.name, marker)
            }
            None => "_".to_string(),
        };
        out.push_str(&format!(
            "  field {}: {}{}\n",
            field.name,
            ty,
            format_attributes(&field.attributes)
        ));
    }
    for value in &block.values {
        out.push_str(&format!(
            "  value {}{}\n",
            value.name,
            format_attributes(&value.attributes)
        ));
    }
    for attribute in &block.attributes {
        out.push_str(&format!("  {}\n", format_attribute(attribute)));
    }
}

fn format_attributes(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|attribute| format!(" {}", format_attribute(attribute)))
        .collect()
}

fn format_attribute(attribute: &Attribute) -> String {
    let prefix = if attribute.block_level { "@@" } else { "@" };
    if attribute.arguments.is_empty() {
        format!("{prefix}{}", attribute.name)
    } else {
        format!(
            "{prefix}{}({})",
            attribute.name,
            format_arguments(&attribute.arguments)
        )
    }
}

fn format_arguments(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|argument| match &argument.name {
            Some(name) => format!("{name}: {}", format_expr(&argument.value)),
            None => format_expr(&argument.value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::String(value) => format!("{value:?}"),
        Expr::Number(value) | Expr::Path(value) => value.to_string(),
        Expr::Call { name, arguments } => format!("{name}({})", format_arguments(arguments)),
        Expr::Array(items) => format!(
            "[{}]",
            items.iter().map(format_expr).collect::<Vec<_>>().join(", ")
        ),
        Expr::Missing => "_".to_string(),
    }
}
