//! Serialization tests for cimatrix-core types.

use cimatrix_core::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_job_matrix_document_layout() {
    let doc = JobMatrixDocument {
        test_suite: vec![
            TestSuite::new("sdk/nodejs unit_tests", "cd sdk/nodejs && make unit_tests"),
            TestSuite::new(
                "pkg 1/2",
                r#"PKGS="example.com/pkg/a example.com/pkg/b" make gotestsum/pkg"#,
            ),
        ],
        platform: vec!["ubuntu-latest".to_string(), "macos-latest".to_string()],
        version_set: vec![VersionSet::current()],
    };

    let value = serde_json::to_value(&doc).expect("serialize");

    assert_eq!(
        value,
        json!({
            "test-suite": [
                {"name": "sdk/nodejs unit_tests", "command": "cd sdk/nodejs && make unit_tests"},
                {"name": "pkg 1/2", "command": "PKGS=\"example.com/pkg/a example.com/pkg/b\" make gotestsum/pkg"}
            ],
            "platform": ["ubuntu-latest", "macos-latest"],
            "version-set": [
                {"name": "current", "dotnet": "6.0.x", "go": "1.19.x", "nodejs": "18.x", "python": "3.10.x"}
            ]
        })
    );
}

#[test]
fn test_job_matrix_document_roundtrip() {
    let doc = JobMatrixDocument {
        test_suite: vec![TestSuite::new("tests 01/12", "make test")],
        platform: vec!["windows-latest".to_string()],
        version_set: vec![VersionSet::minimum(), VersionSet::current()],
    };

    let json = serde_json::to_string(&doc).expect("serialize");
    let parsed: JobMatrixDocument = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(doc, parsed);
}

#[test]
fn test_combined_matrix_keeps_record_key_order() {
    let mut record = MatrixRecord::new();
    record.insert("platform".to_string(), json!("ubuntu-latest"));
    record.insert("arch".to_string(), json!("amd64"));

    let combined = CombinedMatrix {
        include: vec![record],
    };

    let json = serde_json::to_string(&combined).expect("serialize");
    assert_eq!(json, r#"{"include":[{"platform":"ubuntu-latest","arch":"amd64"}]}"#);
}

#[test]
fn test_error_messages_carry_context() {
    let err = Error::discovery("sdk", "exit status 1: undefined: foo");
    assert_eq!(
        err.to_string(),
        "Discovery failed for sdk: exit status 1: undefined: foo"
    );

    let err = Error::InvalidPartitionCount {
        unit: "pkg".to_string(),
        count: 0,
    };
    assert_eq!(
        err.to_string(),
        "Invalid partition count 0 for pkg: must be at least 1"
    );
}
