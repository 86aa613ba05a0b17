use std::fs;
use std::process::Command;

#[test]
fn html_output_needs_no_writable_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    // a file where the home directory should be, so nothing can be created under it
    let home = dir.path().join("home");
    fs::write(&home, "").unwrap();
    let document = dir.path().join("doc.json");
    fs::write(
        &document,
        r#"[{"type":"paragraph","children":[{"text":"hi","bold":true}]}]"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_annotext-cli"))
        .arg("--html")
        .arg(&document)
        .env("HOME", &home)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "<p><span><strong>hi</strong></span></p>"
    );
}
