use anyhow::{anyhow, Result};

pub trait EnvVars: Sized {
    fn load() -> Result<Self>;
}

pub fn required_var(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("{} is not set", key)),
    }
}

pub fn optional_var(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
