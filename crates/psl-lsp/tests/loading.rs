//! Loading multi-file schemas from disk and answering requests against them.

use expect_test::expect;
use psl_lsp::{completion_response, load_schema, LoadError, ProjectConfig};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn labels(list: &lsp_types::CompletionList) -> Vec<&str> {
    list.items.iter().map(|item| item.label.as_str()).collect()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_configured_files_join_the_schema() {
    let root = temp_dir("psl-load-multi");
    fs::create_dir_all(root.join("prisma")).unwrap();
    fs::write(
        root.join("psl.toml"),
        "[schema]\nfiles = [\"prisma/*.prisma\"]\n",
    )
    .unwrap();
    fs::write(
        root.join("prisma/schema.prisma"),
        "datasource db {\n  provider = \"postgresql\"\n}\n\nmodel User {\n  id    Int @id\n  posts \n}\n",
    )
    .unwrap();
    fs::write(
        root.join("prisma/post.prisma"),
        "model Post {\n  id Int @id\n}\n",
    )
    .unwrap();

    let config = ProjectConfig::load(&root);
    let loaded = load_schema(&config, &root.join("prisma/schema.prisma")).unwrap();
    // The target is also matched by the pattern but is only added once.
    assert_eq!(loaded.schema.documents().len(), 2);
    assert_eq!(loaded.schema.documents()[0].uri(), loaded.uri);

    let list = completion_response(
        &loaded.schema,
        &loaded.uri,
        lsp_types::Position::new(6, 8),
        None,
    )
    .unwrap();
    let labels = labels(&list);
    assert!(labels.contains(&"User"));
    assert!(labels.contains(&"Post"));
    assert!(list.is_incomplete);

    fs::remove_dir_all(root).ok();
}

#[test]
fn test_target_alone_without_config() {
    let root = temp_dir("psl-load-single");
    fs::write(root.join("schema.prisma"), "model A {\n  id Int @id\n}\n").unwrap();

    let config = ProjectConfig::load(&root);
    let loaded = load_schema(&config, &root.join("schema.prisma")).unwrap();
    assert_eq!(loaded.schema.documents().len(), 1);
    assert!(loaded.uri.starts_with("file:///"));
    assert!(loaded.uri.ends_with("/schema.prisma"));

    fs::remove_dir_all(root).ok();
}

#[test]
fn test_missing_target_is_an_io_error() {
    let root = temp_dir("psl-load-missing");
    let config = ProjectConfig::load(&root);
    let err = load_schema(&config, &root.join("absent.prisma")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.prisma"));

    fs::remove_dir_all(root).ok();
}

#[test]
fn test_invalid_pattern_is_reported() {
    let root = temp_dir("psl-load-pattern");
    fs::write(root.join("schema.prisma"), "").unwrap();
    let config = ProjectConfig::from_contents(&root, None, "[schema]\nfiles = [\"[\"]\n");
    let err = load_schema(&config, &root.join("schema.prisma")).unwrap_err();
    assert!(matches!(err, LoadError::Pattern { ref pattern, .. } if pattern.ends_with('[')));

    fs::remove_dir_all(root).ok();
}

// =============================================================================
// Responses
// =============================================================================

#[test]
fn test_response_serializes_as_protocol_json() {
    let root = temp_dir("psl-load-json");
    fs::write(root.join("schema.prisma"), "enum Role {\n  ADMIN \n}\n").unwrap();
    let config = ProjectConfig::load(&root);
    let loaded = load_schema(&config, &root.join("schema.prisma")).unwrap();

    let response = completion_response(
        &loaded.schema,
        &loaded.uri,
        lsp_types::Position::new(1, 8),
        None,
    );
    let json = serde_json::to_string(&response).unwrap();
    expect![[r#"{"isIncomplete":false,"items":[{"label":"@map","kind":10,"sortText":"00000"}]}"#]]
        .assert_eq(&json);

    let response = completion_response(
        &loaded.schema,
        &loaded.uri,
        lsp_types::Position::new(0, 6),
        None,
    );
    assert_eq!(serde_json::to_string(&response).unwrap(), "null");

    fs::remove_dir_all(root).ok();
}
