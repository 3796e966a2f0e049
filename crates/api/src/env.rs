use anyhow::Result;
use streamsphere_common::{optional_var, required_var, EnvVars};

pub const DEFAULT_PORT: u16 = 3033;

pub struct ApiServerEnv {
    /// Signs and checks session tokens.
    pub secret_salt: String,
    /// Provider private key. Verifies checkout signatures, never leaves the server.
    pub razorpay_key_secret: String,
    pub port: u16,
}

impl EnvVars for ApiServerEnv {
    fn load() -> Result<Self> {
        let port = optional_var("PORT", &DEFAULT_PORT.to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT is not a valid port number: {}", e))?;

        Ok(Self {
            secret_salt: required_var("SECRET_SALT")?,
            razorpay_key_secret: required_var("RAZORPAY_KEY_SECRET")?,
            port,
        })
    }
}
