mod crypto;
mod env;

pub use crypto::{hmac_sha256_hex, verify_hmac_sha256_hex};
pub use env::{optional_var, required_var, EnvVars};

pub fn get_current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
