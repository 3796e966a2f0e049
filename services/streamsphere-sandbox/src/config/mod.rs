mod users;

pub use users::{get_demo_user, DEMO_USER_ID};

pub const BASE_URL: &str = "http://localhost:3033";
