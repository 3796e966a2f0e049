use streamsphere_runtime::User;

pub const DEMO_USER_ID: &str = "demo-user";

pub fn get_demo_user() -> User {
    let mut user = User::new(DEMO_USER_ID, "Demo Viewer", "demo@streamsphere.dev");
    user.phone = Some("9999999999".to_string());
    user
}
