//! Manifest load error-message and normalization integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use predicates::Predicate;
use quarry_core::{
    manifest,
    types::{BranchName, Manifest},
    ManifestError,
};
use rstest::rstest;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_file_returns_io_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("nope.yaml");
    let err = manifest::load(&path).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("broken.yaml");
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = manifest::load(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("broken.yaml"), "must contain file path, got: {msg}");
    let source_msg = match &err {
        ManifestError::Parse { source, .. } => source.to_string(),
        _ => unreachable!(),
    };
    assert!(!source_msg.is_empty(), "serde_yaml must provide error context");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("list.yaml");
    file.write_str("- this is a list, not a mapping\n").expect("write");

    let err = manifest::load(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
}

#[test]
fn load_rejects_project_without_key() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("manifest.yaml");
    file.write_str("projects:\n  - key: \"\"\n    name: Broken\n")
        .expect("write");

    let err = manifest::load(file.path()).unwrap_err();
    assert!(
        matches!(err, ManifestError::MissingProjectField { field: "key", .. }),
        "got: {err}"
    );
    let check = predicate::str::contains("missing required field 'key'");
    assert!(check.eval(&err.to_string()));
}

#[test]
fn load_rejects_repo_without_slug() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("manifest.yaml");
    file.write_str(
        "projects:\n  - key: TEST\n    name: Test\n    repositories:\n      - slug: \"  \"\n",
    )
    .expect("write");

    let err = manifest::load(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::MissingRepoSlug { .. }), "got: {err}");
    assert!(err.to_string().contains("TEST"));
}

// ---------------------------------------------------------------------------
// 2. Successful load + normalization
// ---------------------------------------------------------------------------

#[test]
fn load_full_manifest_preserves_order_and_defaults() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("manifest.yaml");
    file.write_str(
        r#"projects:
  - key: TEST
    name: Test Project
    repositories:
      - slug: api
        branches: main;dev
      - slug: web
        is_private: false
        branches:
          - main
"#,
    )
    .expect("write");

    let manifest = manifest::load(file.path()).expect("load");
    assert_eq!(manifest.projects.len(), 1);
    let project = &manifest.projects[0];
    assert_eq!(project.key.0, "TEST");
    assert_eq!(project.description, "", "description defaults to empty");
    assert_eq!(project.repositories.len(), 2);
    assert!(project.repositories[0].is_private, "is_private defaults to true");
    assert_eq!(
        project.repositories[0].branches,
        vec![BranchName::from("main"), BranchName::from("dev")]
    );
    assert!(!project.repositories[1].is_private);
}

// ---------------------------------------------------------------------------
// 3. Branch field shapes — each #[case] is isolated
// ---------------------------------------------------------------------------

#[rstest]
#[case("delimited", "branches: main;dev", vec!["main", "dev"])]
#[case("delimited_padded", "branches: \" main ; dev ; \"", vec!["main", "dev"])]
#[case("list", "branches: [main, dev]", vec!["main", "dev"])]
#[case("absent", "", vec![])]
#[case("empty_string", "branches: \"\"", vec![])]
fn branch_field_normalization(
    #[case] label: &str,
    #[case] branches_line: &str,
    #[case] expected: Vec<&str>,
) {
    let yaml = format!(
        "projects:\n  - key: TEST\n    name: Test\n    repositories:\n      - slug: api\n        {branches_line}\n"
    );
    let manifest: Manifest =
        serde_yaml::from_str(&yaml).unwrap_or_else(|e| panic!("[{label}] parse failed: {e}"));
    let got: Vec<&str> = manifest.projects[0].repositories[0]
        .branches
        .iter()
        .map(|b| b.0.as_str())
        .collect();
    assert_eq!(got, expected, "[{label}]");
}
