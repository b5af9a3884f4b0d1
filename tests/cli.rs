//! CLI tests: checking, summarizing, planning and rendering label files.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

const LABELS: &str = "12\n3\nPERU: Cusco\n2000 m\n1\nPARATYPE\n";

fn pinlab_cmd() -> Command {
    Command::new(cargo::cargo_bin!("pinlab"))
}

fn write_temp_labels(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("specimens.txt");
    fs::write(&path, content).expect("write temp labels");
    (dir, path)
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn check_accepts_a_valid_file() {
    let (_dir, path) = write_temp_labels(LABELS);
    let output = pinlab_cmd()
        .arg("check")
        .arg(&path)
        .output()
        .expect("run check");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "No errors found.");
}

#[test]
fn check_reports_the_offending_line() {
    let (_dir, path) = write_temp_labels("12\n\n3\nPERU: Cusco, 2000 m\n");
    let output = pinlab_cmd()
        .arg("check")
        .arg(&path)
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(
        stdout.starts_with("ERROR: check line 4: "),
        "unexpected output: {stdout}"
    );
    assert!(stdout.contains("maximum width is 12"));
}

#[test]
fn check_reports_text_before_any_count() {
    let (_dir, path) = write_temp_labels("12\nPERU\n3\n");
    let output = pinlab_cmd()
        .arg("check")
        .arg(&path)
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).starts_with("ERROR: check line 2: "));
}

#[test]
fn check_reports_oversized_counts_without_crashing() {
    let (_dir, path) = write_temp_labels(&format!("5\n{}\nx\n2\ny\n", usize::MAX));
    let output = pinlab_cmd()
        .arg("check")
        .arg(&path)
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).starts_with("ERROR: the repeat counts ask for more than"));
    // findings are reported once, on stdout
    assert!(output.stderr.is_empty());
}

#[test]
fn render_rejects_oversized_counts() {
    let (_dir, path) = write_temp_labels("5\n1000000000000000000\nx\n");
    let output = pinlab_cmd()
        .arg("render")
        .arg(&path)
        .output()
        .expect("run render");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("repeat counts"));
}

#[test]
fn check_on_a_missing_file_is_not_an_input_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = pinlab_cmd()
        .arg("check")
        .arg(dir.path().join("absent.txt"))
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn show_summarizes_blocks() {
    let (_dir, path) = write_temp_labels(LABELS);
    let output = pinlab_cmd()
        .arg("show")
        .arg(&path)
        .output()
        .expect("run show");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("max width: 12"));
    assert!(stdout.contains("blocks: 2"));
    assert!(stdout.contains("[1] x3 (line 2)"));
    assert!(stdout.contains("    PARATYPE"));
    assert!(stdout.contains("4 label(s) on 1 page(s)"));
}

#[test]
fn plan_json_lists_every_instance() {
    let (_dir, path) = write_temp_labels(LABELS);
    let output = pinlab_cmd()
        .args(["plan", "--json"])
        .arg(&path)
        .output()
        .expect("run plan");
    assert!(output.status.success());

    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("plan output is JSON");
    assert_eq!(plan["instance_count"], 4);
    assert_eq!(plan["max_width"], 12);
    let labels = plan["pages"][0]["labels"].as_array().expect("labels");
    assert_eq!(labels.len(), 4);
    assert_eq!(labels[3]["lines"][0], "PARATYPE");
}

#[test]
fn render_writes_beside_the_input_by_default() {
    let (dir, path) = write_temp_labels(LABELS);
    let output = pinlab_cmd()
        .arg("render")
        .arg(&path)
        .output()
        .expect("run render");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let pdf = fs::read(dir.path().join("specimens_output.pdf")).expect("output exists");
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(stdout_of(&output).contains("4 label(s) on 1 page(s)"));
}

#[test]
fn render_honours_output_and_page_options() {
    let (dir, path) = write_temp_labels(LABELS);
    let out = dir.path().join("sheet.pdf");
    let output = pinlab_cmd()
        .args(["render", "--bold", "--page-size", "letter", "--landscape", "-o"])
        .arg(&out)
        .arg(&path)
        .output()
        .expect("run render");
    assert!(output.status.success());

    let pdf = fs::read(&out).expect("output exists");
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Courier-Bold"));
    assert!(text.contains("/MediaBox [0 0 792 612]"));
}

#[test]
fn geometry_prints_an_editable_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = pinlab_cmd()
        .args(["geometry", "--font-size", "4"])
        .output()
        .expect("run geometry");
    assert!(output.status.success());

    let config: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("geometry output is JSON");
    assert_eq!(config["font_size"], 4.0);
    assert_eq!(config["line_spacing"], 3.5);

    // a printed config can be fed back in
    let path = dir.path().join("geometry.json");
    fs::write(&path, &output.stdout).expect("write config");
    let again = pinlab_cmd()
        .arg("geometry")
        .arg("--geometry")
        .arg(&path)
        .output()
        .expect("run geometry");
    assert!(again.status.success());
    assert_eq!(again.stdout, output.stdout);
}

#[test]
fn bad_geometry_file_exits_with_config_code() {
    let (dir, path) = write_temp_labels(LABELS);
    let config = dir.path().join("broken.json");
    fs::write(&config, "{ not json").expect("write config");
    let output = pinlab_cmd()
        .arg("render")
        .arg(&path)
        .arg("--geometry")
        .arg(&config)
        .output()
        .expect("run render");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("loading geometry"));
}

#[test]
fn unknown_page_size_is_rejected() {
    let (_dir, path) = write_temp_labels(LABELS);
    let output = pinlab_cmd()
        .args(["show", "--page-size", "b7"])
        .arg(&path)
        .output()
        .expect("run show");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown page size"));
}

#[test]
fn invalid_input_exits_with_code_one() {
    let (_dir, path) = write_temp_labels("wide\n1\nx\n");
    let output = pinlab_cmd()
        .arg("render")
        .arg(&path)
        .output()
        .expect("run render");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("maximum label width"));
}
