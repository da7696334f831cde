#![cfg(test)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SCHEMA: &str = r#"
[struct]
name = "Sample"
namespace = "demo"

[[member]]
name = "id"
type = "uint32_t"

[[member]]
name = "ready"
type = "unsigned"
bits = 1
"#;

fn bstruct(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bstruct"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run bstruct")
}

fn write_schema(dir: &Path, text: &str) -> String {
    let path = dir.join("sample.toml");
    fs::write(&path, text).unwrap();
    path.display().to_string()
}

#[test]
fn prints_header_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_schema(dir.path(), SCHEMA);

    let out = bstruct(&[input.as_str()]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], format!("// input config file: {}", input));
    assert!(lines[1].starts_with("#ifndef Sample_"));
    assert_eq!(lines[1].replace("#ifndef", "#define"), lines[2]);
    assert_eq!(lines[3], "namespace demo {");
    assert_eq!(lines[4], "struct Sample {");
    assert_eq!(lines[5], "\tuint32_t id;");
    assert_eq!(lines[6], "\tunsigned ready : 1;");
    assert_eq!(lines[7], "}; // struct size = 8 bytes.");
    assert_eq!(lines[8], "} // namespace demo");
    assert_eq!(lines[9], lines[1].replace("#ifndef", "#endif //"));
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_schema(dir.path(), SCHEMA);
    let output = dir.path().join("sample.h");

    let out = bstruct(&["-o", output.to_str().unwrap(), input.as_str()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let header = fs::read_to_string(&output).unwrap();
    assert!(header.contains("struct Sample {"));
    assert!(header.contains("}; // struct size = 8 bytes."));
}

#[test]
fn guard_token_differs_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_schema(dir.path(), SCHEMA);

    let first = String::from_utf8(bstruct(&[input.as_str()]).stdout).unwrap();
    let second = String::from_utf8(bstruct(&[input.as_str()]).stdout).unwrap();
    assert_ne!(first.lines().nth(1), second.lines().nth(1));
}

#[test]
fn layout_flag_prints_json_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_schema(dir.path(), SCHEMA);

    let out = bstruct(&["--layout", input.as_str()]);
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("\"total_size\": 8"));
}

#[test]
fn missing_input_file_fails() {
    let out = bstruct(&["/no/such/schema.toml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error: file not found: /no/such/schema.toml"));
}

#[test]
fn missing_struct_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_schema(dir.path(), "[[member]]\nname = \"a\"\ntype = \"int\"\n");

    let out = bstruct(&[input.as_str()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error: not found {struct.name}"));
}

#[test]
fn unopenable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_schema(dir.path(), SCHEMA);
    let output = dir.path().join("missing-dir").join("out.h");

    let out = bstruct(&["-o", output.to_str().unwrap(), input.as_str()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error: file open failed:"));
}

#[test]
fn input_is_required() {
    let out = bstruct(&[]);
    assert!(!out.status.success());
}
