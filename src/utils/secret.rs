//! # Secret and Environment Lookup
//!
//! Settings that may be mounted as files (container secrets) are read from
//! `<NAME>_FILE` first and fall back to the plain `<NAME>` variable.

use std::{env, fs};

use tracing::error;

/// Reads a secret from the file named by `file_env_var_name`, or from
/// `env_var_name` when no file variable is set.
///
/// Returns `None` if neither source yields a value.
pub fn get_secret(file_env_var_name: &str, env_var_name: &str) -> Option<String> {
    if let Ok(secret_file_path) = env::var(file_env_var_name) {
        match fs::read_to_string(&secret_file_path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                None
            }
        }
    } else {
        env::var(env_var_name).ok()
    }
}

/// Like [`get_secret`] using the `<NAME>_FILE` / `<NAME>` convention, with an
/// error message naming the missing setting.
pub fn require_secret(name: &str) -> Result<String, String> {
    get_secret(&format!("{name}_FILE"), name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("Env variable `{name}` (or `{name}_FILE`) should be set"))
}

/// Reads a plain environment variable, falling back to `default`.
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
