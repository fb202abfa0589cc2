use std::path::Path;
use std::process::{Command, Output};

fn sofr_curve(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sofr-curve"))
        .args(args)
        .current_dir(workdir)
        .env_remove("DATABASE_URL")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run sofr-curve")
}

fn db_url(workdir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", workdir.join("curve.db").display())
}

#[test]
fn test_rates_on_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = db_url(dir.path());

    let output = sofr_curve(dir.path(), &["rates", "--db-url", &url]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No SOFR rates stored"));
    assert!(dir.path().join("curve.db").exists());
}

#[test]
fn test_project_rejects_floor_above_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    let url = db_url(dir.path());

    let output = sofr_curve(
        dir.path(),
        &[
            "project",
            "--maturity-date",
            "02/02/2030",
            "--floor",
            "0.06",
            "--ceiling",
            "0.05",
            "--spread",
            "0.02",
            "--db-url",
            &url,
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rateFloor must not exceed rateCeiling"));
    assert!(!dir.path().join("curve.db").exists());
}

#[test]
fn test_project_on_empty_curve_fails() {
    let dir = tempfile::tempdir().unwrap();
    let url = db_url(dir.path());

    let output = sofr_curve(
        dir.path(),
        &[
            "project",
            "--maturity-date",
            "02/02/2030",
            "--floor",
            "0.01",
            "--ceiling",
            "0.05",
            "--spread",
            "0.02",
            "--db-url",
            &url,
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No rates projected"));
}
