#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use lazykeg_net::sha256_hex;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_RELEASE: &str = r#"#!/bin/sh
echo run >> "$HOME/installer-runs"
mkdir -p "$HOME/.local/share/fileShare"
cat > "$HOME/.local/share/fileShare/fileshare" <<'EOF'
#!/bin/sh
printf '%s\n' "$@" > "$HOME/argv"
[ "$1" = --help ] && exit 0
exit 7
EOF
chmod 755 "$HOME/.local/share/fileShare/fileshare"
"#;

struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("home")).unwrap();
        fs::write(root.path().join("release.run"), FAKE_RELEASE).unwrap();
        Self { root }
    }

    fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    fn prefix(&self) -> PathBuf {
        self.root.path().join("prefix")
    }

    fn artifact(&self) -> PathBuf {
        self.root.path().join("release.run")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("lazykeg").unwrap();
        cmd.env("HOME", self.home())
            .env("LAZYKEG_PREFIX", self.prefix())
            .env_remove("LAZYKEG_DESCRIPTOR")
            .env_remove("LAZYKEG_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn install(&self) {
        self.cmd()
            .arg("install")
            .arg("--artifact")
            .arg(self.artifact())
            .arg("--sha256")
            .arg(sha256_hex(FAKE_RELEASE.as_bytes()))
            .assert()
            .success()
            .stdout(predicate::str::contains("Installing fileshare 1.0.0"));
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn install_then_smoke_test_then_uninstall() {
    let sandbox = Sandbox::new();
    sandbox.install();

    let bin = sandbox.prefix().join("bin");
    assert!(bin.join("fileshare-installer").is_file());
    assert!(bin.join("fileshare").is_file());
    assert!(!sandbox.home().join(".local/share/fileShare").exists());

    sandbox.cmd().arg("test").assert().success();
    assert_eq!(read_lines(&sandbox.home().join("argv")), vec!["--help"]);

    sandbox
        .cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed fileshare 1.0.0"));

    sandbox.cmd().args(["uninstall", "--zap"]).assert().success();
    assert!(!bin.join("fileshare").exists());
    assert!(!sandbox.home().join(".local/share/fileShare").exists());
}

#[test]
fn placeholder_digest_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("install")
        .arg("--artifact")
        .arg(sandbox.artifact())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sha256"));
    assert!(!sandbox.prefix().join("bin").exists());
}

#[test]
fn tampered_artifact_is_an_integrity_failure() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("install")
        .arg("--artifact")
        .arg(sandbox.artifact())
        .arg("--sha256")
        .arg(sha256_hex(b"something else"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Integrity Error"));
    assert!(!sandbox.prefix().join("bin/fileshare-installer").exists());
}

#[test]
fn launch_bootstraps_once_and_propagates_exit_code() {
    let sandbox = Sandbox::new();
    sandbox.install();

    sandbox
        .cmd()
        .args(["launch", "--version", "-v"])
        .assert()
        .code(7)
        .stdout(predicate::str::contains("Installing fileShare.app..."));
    assert_eq!(
        read_lines(&sandbox.home().join("argv")),
        vec!["--version", "-v"]
    );

    sandbox
        .cmd()
        .args(["launch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installing").not());
    assert_eq!(read_lines(&sandbox.home().join("installer-runs")).len(), 1);
}

#[test]
fn launch_forwards_leading_verbose_flag_to_the_application() {
    let sandbox = Sandbox::new();
    sandbox.install();

    sandbox
        .cmd()
        .args(["launch", "-v", "serve"])
        .assert()
        .code(7);
    assert_eq!(read_lines(&sandbox.home().join("argv")), vec!["-v", "serve"]);
}

#[test]
fn zap_with_unsafe_descriptor_deletes_nothing() {
    let sandbox = Sandbox::new();
    let other_app = sandbox.home().join(".local/share/other-app");
    fs::create_dir_all(&other_app).unwrap();
    fs::write(other_app.join("data"), "keep").unwrap();

    let descriptor = sandbox.root.path().join("descriptor.json");
    fs::write(
        &descriptor,
        r#"{
            "name": "fileshare",
            "homepage": "https://github.com/realwebthings/file-share",
            "url": "https://example.com/v1.0.0/fileshare.run",
            "version": "1.0.0",
            "sha256": "REPLACE_WITH_ACTUAL_SHA256",
            "app": { "share_dir": "" }
        }"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["uninstall", "--zap", "--descriptor"])
        .arg(&descriptor)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("share_dir"));
    assert!(other_app.join("data").exists());
}

#[test]
fn generated_launcher_runs_standalone() {
    let sandbox = Sandbox::new();
    sandbox.install();

    let launcher = sandbox.prefix().join("bin/fileshare");
    let output = std::process::Command::new(&launcher)
        .arg("status")
        .env("HOME", sandbox.home())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert_eq!(read_lines(&sandbox.home().join("argv")), vec!["status"]);
}

#[test]
fn checksum_prints_and_checks_digest() {
    let sandbox = Sandbox::new();
    let digest = sha256_hex(FAKE_RELEASE.as_bytes());
    sandbox
        .cmd()
        .arg("checksum")
        .arg(sandbox.artifact())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(digest.clone()));
    sandbox
        .cmd()
        .arg("checksum")
        .arg(sandbox.artifact())
        .arg("--expect")
        .arg("0".repeat(64))
        .assert()
        .code(4);
}
