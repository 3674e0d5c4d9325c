//! End-to-end tests for the `condres` binary.
#![expect(clippy::expect_used, reason = "tests assert command outcomes")]

use std::io::Write;
use std::str;

use assert_cmd::Command;
use rstest::rstest;

fn condres() -> Command {
    let mut command = Command::cargo_bin("condres").expect("binary exists");
    command.env_remove("CONDRES_LOG_LEVEL");
    command
}

fn stdout_of(output: &std::process::Output) -> &str {
    str::from_utf8(&output.stdout).expect("utf8")
}

#[test]
fn parse_prints_json_clauses() {
    let output = condres()
        .args(["parse", "--json", "no @ (wet AND low_tide)"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(stdout_of(&output)).expect("valid JSON");
    assert_eq!(
        json,
        serde_json::json!([{
            "value": "no",
            "if": {
                "type": "LogicalOperator",
                "operator": "AND",
                "children": [
                    { "type": "Condition", "string": "wet" },
                    { "type": "Condition", "string": "low_tide" },
                ],
            },
        }])
    );
}

#[rstest]
#[case("yes @ (a AND b ; c)", "mix of AND/OR without braces")]
#[case("yes @ (", "Expected a closing bracket")]
#[case("no", "No conditions")]
fn parse_rejects_malformed_values(#[case] value: &str, #[case] message: &str) {
    let output = condres().args(["parse", value]).output().expect("runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains(&format!("error: {message}")), "{stderr}");
    assert!(stderr.contains(&format!("  | {value}")), "{stderr}");
}

#[test]
fn tags_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"access": "no", "access:conditional": "yes @ (Mo-Fr 07:00-19:00; Sa 07:00-13:00)"}}"#
    )
    .expect("write tags");

    let output = condres()
        .arg("tags")
        .arg("access")
        .arg("--file")
        .arg(file.path())
        .output()
        .expect("runs");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(stdout_of(&output)).expect("valid JSON");
    assert_eq!(json.pointer("/default"), Some(&"no".into()));
    assert_eq!(json.pointer("/exceptions/0/value"), Some(&"yes".into()));
    assert_eq!(json.pointer("/exceptions/0/if/operator"), Some(&"OR".into()));
}

#[test]
fn tags_reads_stdin() {
    let output = condres()
        .args(["tags", "maxstay"])
        .write_stdin(r#"{"maxstay": "2 hours"}"#)
        .output()
        .expect("runs");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(stdout_of(&output)).expect("valid JSON");
    assert_eq!(
        json,
        serde_json::json!({ "default": "2 hours", "exceptions": [] })
    );
}

#[test]
fn tags_rejects_non_object_input() {
    let output = condres()
        .args(["tags", "access"])
        .write_stdin("[1, 2]")
        .output()
        .expect("runs");
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("tags must be a JSON object"), "{stderr}");
}

#[test]
fn format_normalises_spacing() {
    let output = condres()
        .args(["format", "  no  @  ( (wet ;  dry )  AND( high_tide ; low_tide) ) "])
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "no @ ((wet;dry) AND (high_tide;low_tide))\n"
    );
}

#[test]
fn invalid_log_level_environment_fails() {
    let output = condres()
        .env("CONDRES_LOG_LEVEL", "loud")
        .args(["format", "no @ wet"])
        .output()
        .expect("runs");
    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("unknown log level"), "{stderr}");
}
