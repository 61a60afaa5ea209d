use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "config_schema_cli_test_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn path_str(&self) -> &str {
        self.path.to_str().unwrap()
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const SYSTEM_XML: &str = r#"
<MODULE>
  <NODE name="system" help="System settings">
    <NODE name="host-name" mode="rw" pattern="[a-z0-9-]+" help="Host name"/>
    <NODE name="log-level" mode="rw" default="6">
      <VALUE name="error" value="3"/>
      <VALUE name="info" value="6"/>
      <VALUE name="debug" value="7"/>
    </NODE>
  </NODE>
</MODULE>
"#;

const SYSTEM_YANG: &str = r#"
module example-system {
  organization "Example Networks";
  revision 2024-03-01;
  container system {
    leaf uptime { type uint64; config false; }
  }
}
"#;

/// Writes the sample schema set into `dir`.
fn write_schemas(dir: &TempDir) {
    fs::write(dir.join("10-system.xml"), SYSTEM_XML).expect("failed to write xml");
    fs::write(dir.join("20-system.yang"), SYSTEM_YANG).expect("failed to write yang");
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_config-schema"))
        .arg("--schema-path")
        .arg(dir.path_str())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run config-schema")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// files / models
// ---------------------------------------------------------------------------

#[test]
fn files_lists_processing_order() {
    let dir = TempDir::new("files");
    write_schemas(&dir);
    fs::write(dir.join("README.txt"), "not a schema").unwrap();

    let out = run(&dir, &["files"]);
    assert!(out.status.success());
    let lines: Vec<String> = stdout(&out).lines().map(String::from).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("10-system.xml"));
    assert!(lines[1].ends_with("20-system.yang"));
}

#[test]
fn models_prints_yang_metadata() {
    let dir = TempDir::new("models");
    write_schemas(&dir);

    let out = run(&dir, &["models"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out).trim(),
        "example-system\tExample Networks\t2024-03-01"
    );
}

// ---------------------------------------------------------------------------
// lookup / translate
// ---------------------------------------------------------------------------

#[test]
fn lookup_reports_node_flags() {
    let dir = TempDir::new("lookup");
    write_schemas(&dir);

    let out = run(&dir, &["lookup", "/system/host_name"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("name: host-name"));
    assert!(text.contains("leaf: true"));
    assert!(text.contains("writable: true"));
    assert!(text.contains("pattern: [a-z0-9-]+"));

    let out = run(&dir, &["lookup", "/system/uptime"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("writable: false"));
}

#[test]
fn lookup_miss_exits_with_error() {
    let dir = TempDir::new("lookup_miss");
    write_schemas(&dir);

    let out = run(&dir, &["lookup", "/system/missing"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: No schema node at '/system/missing'"));
}

#[test]
fn translate_both_directions() {
    let dir = TempDir::new("translate");
    write_schemas(&dir);

    let out = run(&dir, &["translate", "/system/log-level", "7", "--to"]);
    assert_eq!(stdout(&out).trim(), "debug");

    let out = run(&dir, &["translate", "/system/log-level", "--to"]);
    assert_eq!(stdout(&out).trim(), "info");

    let out = run(&dir, &["translate", "/system/log-level", "error", "--from"]);
    assert_eq!(stdout(&out).trim(), "3");

    let out = run(&dir, &["translate", "/system/log-level", "--from"]);
    assert!(out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn translate_requires_direction() {
    let dir = TempDir::new("translate_direction");
    write_schemas(&dir);

    let out = run(&dir, &["translate", "/system/log-level", "7"]);
    assert!(!out.status.success());
}

// ---------------------------------------------------------------------------
// dump / validate
// ---------------------------------------------------------------------------

#[test]
fn dump_text_and_json() {
    let dir = TempDir::new("dump");
    write_schemas(&dir);

    let out = run(&dir, &["dump"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with(" system"));
    assert!(text.contains("  host-name[rw]"));
    assert!(text.contains("    debug[7]"));
    assert!(text.contains("  uptime[r]"));

    let out = run(&dir, &["dump", "--format", "json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["roots"][0]["name"], "system");
    assert_eq!(json["roots"][0]["children"].as_array().unwrap().len(), 3);
    assert_eq!(json["models"][0]["name"], "example-system");
}

#[test]
fn validate_reports_problems() {
    let dir = TempDir::new("validate");
    write_schemas(&dir);

    let out = run(&dir, &["validate"]);
    assert!(out.status.success(), "{}", stdout(&out));
    assert!(stdout(&out).contains("Checked 2 schema file(s), 0 problem(s)."));

    fs::write(
        dir.join("30-broken.xml"),
        r#"<MODULE><NODE name="net"><NODE name="a"/><NODE name="a"/></NODE></MODULE>"#,
    )
    .unwrap();
    let out = run(&dir, &["validate"]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("duplicate sibling a under /net"));
}

#[test]
fn config_file_sets_search_path() {
    let dir = TempDir::new("config");
    write_schemas(&dir);
    let config = dir.join("loader.yml");
    fs::write(
        &config,
        format!("search_path:\n  - {}\nformats:\n  yang: false\n", dir.path_str()),
    )
    .unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_config-schema"))
        .arg("--config")
        .arg(&config)
        .arg("files")
        .output()
        .expect("failed to run config-schema");
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("10-system.xml"));
    assert!(!text.contains("20-system.yang"));
}
