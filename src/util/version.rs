pub const APP_NAME: &str = "RouteMind";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_label() -> String {
    format!("v{}", APP_VERSION)
}

/// User agent sent with every backend request.
pub fn user_agent() -> String {
    format!("routemind/{}", APP_VERSION)
}
