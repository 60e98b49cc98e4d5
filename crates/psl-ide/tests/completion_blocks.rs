//! Completion at the top level and inside datasource and generator blocks.

mod common;
use common::*;

// =============================================================================
// Top Level
// =============================================================================

#[test]
fn test_empty_document_offers_base_blocks() {
    check(
        "|",
        expect![[r#"
isIncomplete: false
Class datasource
Class generator
Class model
Class enum
"#]],
    );
}

#[test]
fn test_whitespace_document_offers_base_blocks() {
    assert_eq!(labels("  \n\n  |"), ["datasource", "generator", "model", "enum"]);
}

#[test]
fn test_mongodb_adds_composite_types() {
    let source = r#"datasource db {
  provider = "mongodb"
}
|"#;
    assert_eq!(
        labels(source),
        ["datasource", "generator", "model", "enum", "type"]
    );
}

#[test]
fn test_sqlite_has_no_enums() {
    let source = r#"datasource db {
  provider = "sqlite"
}

|"#;
    assert_eq!(labels(source), ["datasource", "generator", "model"]);
}

#[test]
fn test_views_preview_feature_adds_view() {
    let source = r#"generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["views"]
}

|"#;
    assert_eq!(
        labels(source),
        ["datasource", "generator", "model", "enum", "view"]
    );
}

#[test]
fn test_commented_preview_feature_is_ignored() {
    let source = r#"generator client {
  provider        = "prisma-client-js"
  // previewFeatures = ["views"]
}

|"#;
    assert_eq!(labels(source), ["datasource", "generator", "model", "enum"]);
}

#[test]
fn test_partial_keyword_after_closed_block() {
    let source = "model A {\n  id Int @id\n}\nmo|";
    assert_eq!(labels(source), ["datasource", "generator", "model", "enum"]);
}

#[test]
fn test_block_header_and_comments_have_no_context() {
    check("model Us|er {\n}\n", expect![[r#"
none
"#]]);
    check("// mo|", expect![[r#"
none
"#]]);
    assert!(completions("model |").is_none());
}

// =============================================================================
// Datasource
// =============================================================================

#[test]
fn test_datasource_keys() {
    check(
        "datasource db {\n  |\n}\n",
        expect![[r#"
isIncomplete: false
Field provider
Field url
Field shadowDatabaseUrl
Field directUrl
Field relationMode
"#]],
    );
}

#[test]
fn test_datasource_keys_skip_declared_and_follow_provider() {
    let source = r#"datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
  |
}"#;
    assert_eq!(
        labels(source),
        ["shadowDatabaseUrl", "directUrl", "relationMode", "schemas"]
    );
}

#[test]
fn test_postgres_extensions_need_preview_feature() {
    let source = r#"generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["postgresqlExtensions"]
}

datasource db {
  provider = "postgresql"
  |
}"#;
    assert_eq!(
        labels(source),
        [
            "url",
            "shadowDatabaseUrl",
            "directUrl",
            "relationMode",
            "extensions",
            "schemas"
        ]
    );
}

#[test]
fn test_provider_value_is_an_open_set() {
    check(
        "datasource db {\n  provider = |\n}\n",
        expect![[r#"
isIncomplete: true
Property ""
"#]],
    );
    check(
        "datasource db {\n  provider = \"|\"\n}\n",
        expect![[r#"
isIncomplete: true
Constant mysql
Constant postgresql
Constant sqlite
Constant sqlserver
Constant mongodb
Constant cockroachdb
"#]],
    );
}

#[test]
fn test_url_values() {
    check(
        "datasource db {\n  url = |\n}\n",
        expect![[r#"
isIncomplete: false
Property env()
Property ""
"#]],
    );
    check(
        "datasource db {\n  url = env(\"|\")\n}\n",
        expect![[r#"
isIncomplete: false
Constant DATABASE_URL
"#]],
    );
    assert_eq!(
        labels("datasource db {\n  shadowDatabaseUrl = env(\"|\n}\n"),
        ["SHADOW_DATABASE_URL"]
    );
}

#[test]
fn test_relation_mode_values() {
    check(
        "datasource db {\n  relationMode = |\n}\n",
        expect![[r#"
isIncomplete: false
Field "foreignKeys"
Field "prisma"
"#]],
    );
    assert_eq!(
        labels("datasource db {\n  relationMode = \"|\"\n}\n"),
        ["foreignKeys", "prisma"]
    );
}

#[test]
fn test_complete_value_has_no_context() {
    assert!(completions("datasource db {\n  provider = \"mysql\" |\n}\n").is_none());
    assert!(completions("datasource db {\n  // provider = |\n}\n").is_none());
}

// =============================================================================
// Generator
// =============================================================================

#[test]
fn test_generator_needs_provider_first() {
    assert_eq!(labels("generator client {\n  |\n}\n"), ["provider"]);
}

#[test]
fn test_generator_keys_follow_provider() {
    let source = r#"generator client {
  provider = "prisma-client-js"
  output   = "./client"
  |
}"#;
    assert_eq!(
        labels(source),
        ["previewFeatures", "engineType", "binaryTargets"]
    );

    let source = r#"generator client {
  provider = "prisma-client"
  |
}"#;
    assert_eq!(
        labels(source),
        [
            "previewFeatures",
            "output",
            "runtime",
            "moduleFormat",
            "generatedFileExtension",
            "importFileExtension"
        ]
    );

    let source = r#"generator docs {
  provider = "prisma-docs-generator"
  |
}"#;
    assert_eq!(labels(source), ["previewFeatures", "output"]);
}

#[test]
fn test_generator_provider_values() {
    check(
        "generator client {\n  provider = \"|\"\n}\n",
        expect![[r#"
isIncomplete: true
Constant prisma-client-js
Constant prisma-client
"#]],
    );
}

#[test]
fn test_generator_literal_sets_are_open() {
    let source = r#"generator client {
  provider     = "prisma-client"
  moduleFormat = "|"
}"#;
    check(
        source,
        expect![[r#"
isIncomplete: true
Constant esm
Constant cjs
"#]],
    );

    let source = r#"generator client {
  provider = "prisma-client"
  runtime  = |
}"#;
    check(
        source,
        expect![[r#"
isIncomplete: true
Property ""
"#]],
    );
}

#[test]
fn test_engine_type_only_for_client_js() {
    let source = r#"generator client {
  provider   = "prisma-client-js"
  engineType = "|"
}"#;
    assert_eq!(labels(source), ["library", "binary", "client"]);

    let source = r#"generator client {
  provider   = "prisma-client"
  engineType = "|"
}"#;
    let list = completions(source).unwrap();
    assert!(list.items.is_empty());
    assert!(!list.is_incomplete);
}

#[test]
fn test_preview_features_skip_listed() {
    let source = r#"generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["views", "metrics", |]
}"#;
    check(
        source,
        expect![[r#"
isIncomplete: true
Constant driverAdapters
Constant fullTextIndex
Constant fullTextSearchPostgres
Constant multiSchema
Constant nativeDistinct
Constant postgresqlExtensions
Constant relationJoins
Constant shardKeys
Constant strictUndefinedChecks
Constant typedSql
"#]],
    );
}

#[test]
fn test_binary_targets_skip_listed() {
    let source = r#"generator client {
  provider      = "prisma-client-js"
  binaryTargets = ["native", "|"]
}"#;
    let list = completions(source).unwrap();
    assert!(list.is_incomplete);
    let labels: Vec<_> = list.labels().collect();
    assert!(!labels.contains(&"native"));
    assert!(labels.contains(&"debian-openssl-3.0.x"));
}
