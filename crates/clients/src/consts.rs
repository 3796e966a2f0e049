pub const DEFAULT_RAZORPAY_API_BASE: &str = "https://api.razorpay.com/v1";
pub const PROVIDER_REQUEST_TIMEOUT_SECS: u64 = 15;
