//! Shared helpers for completion tests.
#![allow(dead_code, unused_imports)]

pub use expect_test::{expect, Expect};
pub use psl_ide::{complete, completion_context, CompletionContext, CompletionList};
pub use psl_syntax::{Position, Schema, TextSize};

pub const URI: &str = "file:///schema.prisma";

/// Parses `source` with the `|` cursor marker removed.
pub fn fixture(source: &str) -> (Schema, Position) {
    let cursor = source.find('|').expect("cursor marker");
    let mut cleaned = source.to_string();
    cleaned.remove(cursor);
    let schema = Schema::single_file(URI, cleaned);
    let position = schema.documents()[0].position(TextSize::from(cursor as u32));
    (schema, position)
}

/// Completions at the cursor marker.
pub fn completions(source: &str) -> Option<CompletionList> {
    let (schema, position) = fixture(source);
    complete(&schema, URI, position)
}

/// Labels at the cursor marker, empty when there is no context.
pub fn labels(source: &str) -> Vec<String> {
    completions(source)
        .map(|list| list.labels().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Renders a completion list one item per line, kind first.
pub fn render(list: Option<&CompletionList>) -> String {
    let Some(list) = list else {
        return "none\n".to_string();
    };
    let mut out = format!("isIncomplete: {}\n", list.is_incomplete);
    for item in &list.items {
        out.push_str(&format!("{:?} {}\n", item.kind, item.label));
    }
    out
}

/// Compares the rendered completions at the cursor marker.
pub fn check(source: &str, expect: Expect) {
    expect.assert_eq(&render(completions(source).as_ref()));
}

/// Runs `f` on the classified context at the cursor marker.
pub fn with_context<R>(source: &str, f: impl FnOnce(Option<&CompletionContext<'_>>) -> R) -> R {
    let (schema, position) = fixture(source);
    let context = completion_context(&schema, URI, position);
    f(context.as_ref())
}
