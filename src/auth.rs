use crate::config::AuthConfig;
use crate::error::{DeckError, Result};

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

/// Resolve a GitHub token:
/// 1. Environment variable named in the config
/// 2. Output of the configured command (e.g. `gh auth token`)
pub fn load_token(auth: &AuthConfig) -> Result<String> {
    if let Some(env_var) = &auth.token_env {
        if let Ok(token) = std::env::var(env_var) {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    if let Some(cmd) = &auth.token_command {
        if let Some(token) = try_cli_token(cmd) {
            return Ok(token);
        }
    }

    let hint = auth.token_env.as_deref().unwrap_or("GITHUB_TOKEN");
    Err(DeckError::Auth(format!(
        "no GitHub token found; set {} or configure auth.token_command",
        hint
    )))
}
