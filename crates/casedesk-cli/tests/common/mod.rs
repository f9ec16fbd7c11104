use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI with a custom HOME directory for isolated session storage.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    run_cli_with_extra_env(args, home, api_url, &[])
}

/// Run the CLI with a custom HOME plus additional environment variables.
pub fn run_cli_with_extra_env(
    args: &[&str],
    home: &Path,
    api_url: &str,
    extra: &[(&str, &str)],
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casedesk"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("CASEDESK_API_URL", api_url);
    cmd.env_remove("CASEDESK_TIMEOUT_SECS");
    cmd.env("NO_COLOR", "1");
    cmd.envs(extra.iter().copied());
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Where the CLI keeps its session under `home`.
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data").join("casedesk").join("session.json")
}

/// Write a stored session as if a previous run had logged in.
pub fn seed_session(home: &Path, access_token: &str, refresh_token: Option<&str>) {
    let path = session_file(home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut session = serde_json::Map::new();
    session.insert("access_token".into(), access_token.into());
    if let Some(refresh_token) = refresh_token {
        session.insert("refresh_token".into(), refresh_token.into());
    }
    fs::write(&path, serde_json::to_string(&session).unwrap()).unwrap();
}

/// Read a key back from the stored session.
pub fn stored(home: &Path, key: &str) -> Option<String> {
    let contents = fs::read_to_string(session_file(home)).ok()?;
    let session: serde_json::Value = serde_json::from_str(&contents).ok()?;
    session[key].as_str().map(str::to_string)
}
