mod common;
use common::*;

// Error Recovery
#[test]
fn test_unclosed_arguments_and_missing_brace() {
    insta::assert_snapshot!(snapshot_schema(
        r#"model Post {
  id Int @id
  title String @default(
  @@index([title
}

model Draft {
  body
"#
    ), @r"
model Post
  field id: Int @id
  field title: String @default
  @@index([title])
model Draft (unclosed)
  field body: _
");
}

#[test]
fn test_incomplete_properties() {
    insta::assert_snapshot!(snapshot_schema(
        r#"datasource db {
  provider =
  url = env("DB
}
"#
    ), @r#"
datasource db
  property provider
  property url = env("DB")
"#);
}

#[test]
fn test_stray_tokens_are_skipped() {
    insta::assert_snapshot!(snapshot_schema(
        r#"}
garbage here
model A {
  $ id Int
  name String @@map("x")
}
"#
    ), @r#"
model A
  field name: String @@map("x")
"#);
}

#[test]
fn test_header_without_brace_is_not_a_block() {
    insta::assert_snapshot!(snapshot_schema(
        r#"model A
model B {
  id Int
}
"#
    ), @r"
model B
  field id: Int
");
}
