//! Completion on field, enum value and block attribute lines.

mod common;
use common::*;

// =============================================================================
// Field Types
// =============================================================================

#[test]
fn test_field_type_lists_scalars_then_declared_types() {
    let source = r#"model User {
  id   Int @id
  role |
}

enum Role {
  USER
}

model Post {
  id Int @id
}
"#;
    check(
        source,
        expect![[r#"
isIncomplete: true
TypeParameter String
TypeParameter Boolean
TypeParameter Int
TypeParameter Float
TypeParameter DateTime
TypeParameter Json
TypeParameter Bytes
TypeParameter Decimal
TypeParameter BigInt
TypeParameter Unsupported
Reference User
Reference Role
Reference Post
"#]],
    );
}

#[test]
fn test_partial_field_type_keeps_context() {
    let source = "model User {\n  id Int @id\n  role Ro|\n}\n";
    let labels = labels(source);
    assert_eq!(labels.first().map(String::as_str), Some("String"));
    assert_eq!(labels.last().map(String::as_str), Some("User"));
}

#[test]
fn test_scalar_types_follow_connector() {
    let sqlite = r#"datasource db {
  provider = "sqlite"
}

model A {
  value |
}"#;
    assert!(!labels(sqlite).contains(&"Json".to_string()));

    let mongodb = r#"datasource db {
  provider = "mongodb"
}

model A {
  value |
}"#;
    let labels = labels(mongodb);
    assert!(labels.contains(&"Json".to_string()));
    assert!(!labels.contains(&"Decimal".to_string()));
}

#[test]
fn test_first_word_before_existing_text_offers_nothing() {
    check(
        "model User {\n  |name String\n}\n",
        expect![[r#"
isIncomplete: false
"#]],
    );
}

// =============================================================================
// Field Attributes
// =============================================================================

#[test]
fn test_field_attributes_skip_taken_id() {
    let source = r#"model User {
  id    Int    @id @default(autoincrement())
  email String |
}"#;
    check(
        source,
        expect![[r#"
isIncomplete: false
Property @unique
Property @map
Property @default
Property @relation
Property @ignore
"#]],
    );
}

#[test]
fn test_present_attributes_are_removed() {
    let source = r#"model User {
  id    Int    @id
  email String @unique @map("email_address") |
}"#;
    assert_eq!(labels(source), ["@default", "@relation", "@ignore"]);

    let source = r#"model User {
  id    Int    @id
  email String @map("email_address") |
}"#;
    assert_eq!(labels(source), ["@unique", "@default", "@relation", "@ignore"]);
}

#[test]
fn test_id_is_offered_until_taken() {
    let source = "model User {\n  name String |\n}\n";
    assert_eq!(
        labels(source),
        ["@id", "@unique", "@map", "@default", "@relation", "@ignore"]
    );
}

#[test]
fn test_block_level_attributes_exclude_field_counterparts() {
    let source = r#"model Pair {
  a     Int
  b     Int |
  email String
  @@id([a, b])
  @@unique([email])
}"#;
    assert_eq!(
        labels(source),
        ["@unique", "@map", "@default", "@relation", "@ignore"]
    );

    let source = r#"model Pair {
  a     Int
  b     Int
  email String |
  @@id([a, b])
  @@unique([email])
  @@ignore
}"#;
    assert_eq!(labels(source), ["@map", "@default", "@relation"]);
}

#[test]
fn test_updated_at_only_for_date_time() {
    let source = r#"model Post {
  id        Int      @id
  updatedAt DateTime |
}"#;
    assert_eq!(
        labels(source),
        ["@unique", "@map", "@default", "@relation", "@updatedAt", "@ignore"]
    );
}

#[test]
fn test_relation_fields_cannot_be_ids() {
    let source = r#"model Post {
  author User |
}

model User {
  id Int @id
}"#;
    let labels = labels(source);
    assert!(!labels.contains(&"@id".to_string()));
    assert!(labels.contains(&"@relation".to_string()));
}

#[test]
fn test_native_type_prefix_is_offered_with_a_connector() {
    let source = r#"datasource db {
  provider = "postgresql"
}

model User {
  id   Int    @id
  name String |
}"#;
    assert_eq!(labels(source).first().map(String::as_str), Some("@db"));

    let source = r#"datasource db {
  provider = "postgresql"
}

model User {
  id   Int    @id
  name String @db.Text |
}"#;
    assert!(!labels(source).contains(&"@db".to_string()));
}

#[test]
fn test_composite_type_fields() {
    let source = r#"datasource db {
  provider = "mongodb"
}

type Address {
  street String |
}"#;
    assert_eq!(labels(source), ["@db", "@map", "@default"]);
}

#[test]
fn test_enum_value_attributes() {
    check(
        "enum Role {\n  ADMIN |\n}\n",
        expect![[r#"
isIncomplete: false
Property @map
"#]],
    );
    assert!(labels("enum Role {\n  ADMIN @map(\"admin\") |\n}\n").is_empty());
}

#[test]
fn test_comment_on_field_line_has_no_context() {
    assert!(completions("model A {\n  id Int // |\n}\n").is_none());
}

// =============================================================================
// Native Types
// =============================================================================

#[test]
fn test_native_types_for_postgres_string() {
    let source = r#"datasource db {
  provider = "postgresql"
}

model User {
  id   Int    @id
  name String @db.|
}"#;
    check(
        source,
        expect![[r#"
isIncomplete: false
TypeParameter Text
TypeParameter Char()
TypeParameter VarChar()
TypeParameter Bit()
TypeParameter VarBit()
TypeParameter Uuid
TypeParameter Xml
TypeParameter Inet
TypeParameter Citext
"#]],
    );
}

#[test]
fn test_native_types_need_a_connector() {
    let source = "model User {\n  name String @db.|\n}\n";
    let list = completions(source).unwrap();
    assert!(list.items.is_empty());
}

#[test]
fn test_partial_native_type_keeps_context() {
    let source = r#"datasource db {
  provider = "cockroachdb"
}

model User {
  active Boolean @db.Bo|
}"#;
    assert_eq!(labels(source), ["Bool"]);
}

// =============================================================================
// Block Attributes
// =============================================================================

#[test]
fn test_block_attributes_on_bare_line() {
    let source = r#"model User {
  id   Int    @id
  name String
  |
}"#;
    check(
        source,
        expect![[r#"
isIncomplete: false
Property @@map
Property @@unique
Property @@index
Property @@ignore
"#]],
    );
}

#[test]
fn test_once_per_block_attributes_are_removed() {
    let source = r#"model User {
  a Int
  b Int
  @@map("users")
  @@id([a, b])
  |
}"#;
    assert_eq!(labels(source), ["@@unique", "@@index", "@@ignore"]);

    // Position does not matter.
    let source = r#"model User {
  a Int
  |
  b Int
  @@map("users")
}"#;
    assert_eq!(labels(source), ["@@id", "@@unique", "@@index", "@@ignore"]);
}

#[test]
fn test_block_attributes_follow_connector_and_features() {
    let source = r#"datasource db {
  provider = "mysql"
}

generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["fullTextIndex", "shardKeys"]
}

model Post {
  title String
  @@|
}"#;
    assert_eq!(
        labels(source),
        [
            "@@map",
            "@@id",
            "@@unique",
            "@@index",
            "@@fulltext",
            "@@ignore",
            "@@shardKey"
        ]
    );

    let source = r#"datasource db {
  provider = "postgresql"
}

model Post {
  id Int @id
  |
}"#;
    assert_eq!(
        labels(source),
        ["@@map", "@@unique", "@@index", "@@ignore", "@@schema"]
    );
}

#[test]
fn test_enum_and_composite_block_attributes() {
    assert_eq!(labels("enum Role {\n  USER\n  |\n}\n"), ["@@map"]);

    let source = r#"datasource db {
  provider = "mongodb"
}

type Address {
  street String
  |
}"#;
    assert!(labels(source).is_empty());
}

#[test]
fn test_unclosed_block_still_completes() {
    let source = "model User {\n  id Int @id\n  |";
    assert_eq!(
        labels(source),
        ["@@map", "@@unique", "@@index", "@@ignore"]
    );
}
