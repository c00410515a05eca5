use std::path::Path;
use std::process::{Command, Output, Stdio};

use url::Url;

/// A `file://` store URL for a directory.
pub fn file_store_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// A CLI command with isolated HOME and data directories.
pub fn cli_command(args: &[&str], home: &Path, store_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_items"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.env("ITEMS_STORE", store_url);
    cmd
}

/// Run the CLI against a store.
pub fn run_cli(args: &[&str], home: &Path, store_url: &str) -> Output {
    cli_command(args, home, store_url)
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], home: &Path, store_url: &str) -> String {
    let output = run_cli(args, home, store_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with `input` on stdin and expect success.
pub fn run_cli_with_stdin(args: &[&str], home: &Path, store_url: &str, input: &str) -> String {
    use std::io::Write;

    let mut child = cli_command(args, home, store_url)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
