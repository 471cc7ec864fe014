#![cfg(unix)]
//! Runs the generated launcher under bash against a fake release artifact.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use lazykeg_common::config::Config;
use lazykeg_common::model::PackageDescriptor;
use lazykeg_common::paths::InstallPaths;
use lazykeg_core::install::install_from_bytes;
use lazykeg_net::sha256_hex;

// Stands in for the release `.run` file: records each run and drops a
// target that records its argv and exits 7.
const FAKE_INSTALLER: &str = r#"#!/bin/sh
echo "$#" >> "$HOME/installer-runs"
mkdir -p "$HOME/.local/share/fileShare"
cat > "$HOME/.local/share/fileShare/fileshare" <<'EOF'
#!/bin/sh
printf '%s\n' "$@" > "$HOME/argv"
exit 7
EOF
chmod 755 "$HOME/.local/share/fileShare/fileshare"
"#;

fn install(root: &Path) -> InstallPaths {
    let config = Config::with_roots(root.join("prefix"), root.join("home"));
    fs::create_dir_all(config.home_dir()).unwrap();
    let descriptor =
        PackageDescriptor::fileshare().with_sha256(sha256_hex(FAKE_INSTALLER.as_bytes()));
    let paths = InstallPaths::new(&config, &descriptor);
    install_from_bytes(&descriptor, &paths, FAKE_INSTALLER.as_bytes()).unwrap();
    paths
}

fn launch(paths: &InstallPaths, args: &[&str]) -> Output {
    Command::new(&paths.launcher_path)
        .args(args)
        .env("HOME", &paths.home)
        .output()
        .unwrap()
}

fn installer_runs(paths: &InstallPaths) -> Vec<String> {
    fs::read_to_string(paths.home.join("installer-runs"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn cold_launch_installs_then_forwards_args_and_exit_code() {
    let root = tempfile::tempdir().unwrap();
    let paths = install(root.path());

    let output = launch(&paths, &["--help"]);

    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Installing fileShare.app...\n"
    );
    assert_eq!(output.status.code(), Some(7));
    // Installer was invoked exactly once, with no arguments.
    assert_eq!(installer_runs(&paths), vec!["0".to_string()]);
    assert_eq!(
        fs::read_to_string(paths.home.join("argv")).unwrap(),
        "--help\n"
    );
}

#[test]
fn warm_launch_skips_installer_and_message() {
    let root = tempfile::tempdir().unwrap();
    let paths = install(root.path());

    launch(&paths, &[]);
    let output = launch(&paths, &["share", "a file.txt"]);

    assert!(output.stdout.is_empty());
    assert_eq!(output.status.code(), Some(7));
    assert_eq!(installer_runs(&paths).len(), 1);
    assert_eq!(
        fs::read_to_string(paths.home.join("argv")).unwrap(),
        "share\na file.txt\n"
    );
}

#[test]
fn failing_installer_exit_code_is_propagated() {
    let root = tempfile::tempdir().unwrap();
    let paths = install(root.path());
    fs::write(&paths.installer_path, "#!/bin/sh\nexit 5\n").unwrap();

    let output = launch(&paths, &["--help"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(!paths.home.join("argv").exists());
}
