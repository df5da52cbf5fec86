use std::{env, fs, process::Command};

#[test]
fn demo_level_passes_with_its_scenario() {
    let output = Command::new(env!("CARGO_BIN_EXE_switchyard"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args([
            "--level",
            "levels/demo.lvl",
            "--scenario",
            "levels/demo.toml",
        ])
        .output()
        .expect("failed to launch the switchyard binary");

    assert!(output.status.success(), "demo run should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0 crashes, passed: true"),
        "unexpected summary: {stdout}"
    );
}

#[test]
fn missing_tracks_fail_the_demo_level() {
    let output = Command::new(env!("CARGO_BIN_EXE_switchyard"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["--level", "levels/demo.lvl", "--ticks", "100"])
        .output()
        .expect("failed to launch the switchyard binary");

    assert!(output.status.success(), "run without strokes still completes");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("passed: false"), "unexpected summary: {stdout}");
}

#[test]
fn saved_layout_is_canonical_text() {
    let target = env::temp_dir().join(format!("switchyard-save-{}.lvl", std::process::id()));
    let status = Command::new(env!("CARGO_BIN_EXE_switchyard"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["--level", "levels/demo.lvl", "--ticks", "0", "--save"])
        .arg(&target)
        .status()
        .expect("failed to launch the switchyard binary");
    assert!(status.success(), "save run should succeed");

    let saved = fs::read_to_string(&target).expect("layout written");
    let _ = fs::remove_file(&target);
    let rows: Vec<&str> = saved.lines().collect();
    assert_eq!(rows.len(), 8);
    assert!(rows[3].starts_with("D2B0  E     A1B0"), "row was {:?}", rows[3]);
}

#[test]
fn malformed_level_is_reported() {
    let target = env::temp_dir().join(format!("switchyard-bad-{}.lvl", std::process::id()));
    fs::write(&target, "E E E\n").expect("fixture written");
    let output = Command::new(env!("CARGO_BIN_EXE_switchyard"))
        .args(["--level"])
        .arg(&target)
        .output()
        .expect("failed to launch the switchyard binary");
    let _ = fs::remove_file(&target);

    assert!(!output.status.success(), "malformed level must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected 8 rows"), "unexpected error: {stderr}");
}
