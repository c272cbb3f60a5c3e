//! End-to-end tests for the `restjson-probe` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn probe() -> Command {
    let mut cmd = Command::cargo_bin("restjson-probe").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn identify_prints_the_error_type() {
    let fixture = write_fixture(
        r#"{"status": 400, "headers": [["x-amzn-errortype", "FooError:http://example.com/"]]}"#,
    );
    probe()
        .args(["identify", "--operation", "com.test#TestOperation", "--known", "com.test#FooError"])
        .arg("--response")
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("error-type: com.test#FooError"))
        .stdout(predicate::str::contains("resolution: modeled com.test#FooError"));
}

#[test]
fn identify_rejects_malformed_operation_ids() {
    let fixture = write_fixture(r#"{"status": 500}"#);
    probe()
        .args(["identify", "--operation", "NoNamespace"])
        .arg("--response")
        .arg(fixture.path())
        .assert()
        .failure();
}

#[test]
fn discriminate_fails_without_a_type_tag() {
    let body = write_fixture(r#"{"value": 1}"#);
    probe()
        .args(["discriminate", "--schema", "com.example#Shape", "--shape-type", "union"])
        .arg("--body")
        .arg(body.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to parse discriminator for union document."));
}

#[test]
fn trait_prints_inherited_event_stream_versions() {
    probe()
        .args(["trait", "--kind", "rest-json1", "--value", r#"{"http": ["h2"]}"#])
        .assert()
        .success()
        .stdout("http: h2\nevent-stream-http: h2\n");
}

#[test]
fn trait_rejects_sigv4_without_name() {
    probe()
        .args(["--log-format", "json", "trait", "--kind", "sigv4", "--value", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field 'name'"));
}
