// tests/descriptor.rs

//! Descriptor loading from disk.

mod common;

use common::TestTree;
use stagesplit::{ArtifactDescriptor, ComponentRegistry, Error, SchemaError};

#[test]
fn test_load_error_names_file() {
    let tree = TestTree::new();
    let path = tree.write_descriptor("foobar = 1\n");

    let err = ArtifactDescriptor::from_file(&path, &ComponentRegistry::builtin()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("illegal key: 'foobar'"), "{}", msg);
    assert!(msg.contains("while loading descriptor from"), "{}", msg);
    assert!(msg.contains("descriptor.toml"), "{}", msg);
    assert!(matches!(
        err,
        Error::Descriptor {
            source: SchemaError::IllegalKey { .. },
            ..
        }
    ));
    assert!(err.is_authoring_error());
}

#[test]
fn test_missing_file_is_io_error() {
    let tree = TestTree::new();
    let err = ArtifactDescriptor::from_file(
        &tree.path().join("missing.toml"),
        &ComponentRegistry::builtin(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_authoring_error());
}

#[test]
fn test_empty_file_has_every_builtin_component() {
    let tree = TestTree::new();
    let descriptor = tree.load_descriptor("");

    let names: Vec<&str> = descriptor.component_names().collect();
    assert_eq!(names, vec!["dbg", "dev", "doc", "lib", "run"]);
    assert_eq!(descriptor.component("dbg").unwrap().extends(), ["run"]);
}

#[test]
fn test_full_descriptor() {
    let tree = TestTree::new();
    let descriptor = tree.load_descriptor(
        r#"
        [options]
        unmatched_exclude = ["bin/xyz.exe"]

        [components.lib."math-libs/BLAS/stage"]

        [components.run."math-libs/BLAS/stage"]
        include = "bin/*.exe"
        exclude = ["bin/def.exe", "bin/xyz.exe"]

        [components.dev."math-libs/BLAS/stage"]
        force_include = "include/generated/**"

        [components.lib."third-party/stage"]
        optional = ["windows"]
        "#,
    );

    let lib = descriptor.component("lib").unwrap();
    let basedirs: Vec<&String> = lib.basedirs().keys().collect();
    assert_eq!(basedirs, ["math-libs/BLAS/stage", "third-party/stage"]);
    assert!(lib.basedir("third-party/stage").unwrap().optional().applies_to("windows"));

    let run = descriptor.component("run").unwrap();
    let predicate = run.basedir("math-libs/BLAS/stage").unwrap().predicate();
    assert!(predicate.matches("bin/abc.exe"));
    assert!(!predicate.matches("bin/xyz.exe"));

    let dev = descriptor.component("dev").unwrap();
    let predicate = dev.basedir("math-libs/BLAS/stage").unwrap().predicate();
    assert!(predicate.matches("include/generated/config.h"));
    assert!(predicate.matches("lib/cmake/blas/blas-config.cmake"));

    assert!(!descriptor.options().unmatched_policy().rejects("bin/xyz.exe"));
}

#[test]
fn test_typo_in_basedir_key_rejected() {
    let tree = TestTree::new();
    let path = tree.write_descriptor(
        r#"
        [components.lib."stage"]
        includes = "lib/**"
        "#,
    );

    let err = ArtifactDescriptor::from_file(&path, &ComponentRegistry::builtin()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("'includes'"), "{}", msg);
    assert!(msg.contains("default_patterns, exclude, force_include, include, optional"), "{}", msg);
}
