use assert_cmd::Command;

const BINARY: &str = "p4st";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn version_flag_reports_the_crate_version() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("--version").assert().success().stdout(format!("{BINARY} {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn inspect_lists_every_definition_with_its_kind_and_arity() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    let output = cmd.arg("inspect").arg(fixture("sum_and_double.json")).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("relation  Sum (arity 2)"), "stdout was:\n{stdout}");
    assert!(stdout.contains("function  Double (arity 1)"), "stdout was:\n{stdout}");
}

#[test]
fn inspect_json_format_reports_structured_definitions() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    let output = cmd
        .arg("inspect")
        .arg(fixture("sum_and_double.json"))
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let defs = parsed.as_array().unwrap();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0]["id"], "Sum");
    assert_eq!(defs[0]["kind"], "relation");
}

#[test]
fn run_evaluates_a_relation_against_json_input() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("run")
        .arg(fixture("sum_and_double.json"))
        .arg("--relation")
        .arg("Sum")
        .arg("--input")
        .arg("[1, 2, 3]")
        .assert()
        .success()
        .stdout("n = 6\n");
}

#[test]
fn run_reports_the_phantom_log_in_json_format() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    let output = cmd
        .arg("run")
        .arg(fixture("sum_and_double.json"))
        .arg("--relation")
        .arg("Sum")
        .arg("--input")
        .arg("[4, 5]")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["bindings"]["n"], "9");
    assert_eq!(parsed["phantoms"].as_array().unwrap().len(), 0);
}

#[test]
fn call_invokes_a_deterministic_function() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("call")
        .arg(fixture("sum_and_double.json"))
        .arg("--function")
        .arg("Double")
        .arg("--arg")
        .arg("21")
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn run_against_an_unknown_relation_fails_with_a_diagnostic() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("run")
        .arg(fixture("sum_and_double.json"))
        .arg("--relation")
        .arg("DoesNotExist")
        .assert()
        .failure();
}

#[test]
fn a_spec_that_cannot_be_read_exits_with_code_one() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("inspect").arg("/no/such/file.json").assert().failure().code(1);
}

#[test]
fn an_unbound_relation_exits_with_code_two() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("run")
        .arg(fixture("sum_and_double.json"))
        .arg("--relation")
        .arg("DoesNotExist")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn run_accepts_a_spec_copied_to_an_arbitrary_path() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("spec.json");
    std::fs::copy(fixture("sum_and_double.json"), &spec_path).unwrap();

    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("call")
        .arg(&spec_path)
        .arg("--function")
        .arg("Double")
        .arg("--arg")
        .arg("10")
        .assert()
        .success()
        .stdout("20\n");
}

#[test]
fn call_with_the_wrong_arity_fails() {
    let mut cmd = Command::cargo_bin(BINARY).unwrap();
    cmd.arg("call")
        .arg(fixture("sum_and_double.json"))
        .arg("--function")
        .arg("Double")
        .assert()
        .failure();
}
