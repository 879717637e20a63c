//! Unique test data so parallel tests sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{8 hex chars}`; short enough to stay readable in failure output.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// let b = unique_str("player");
/// assert_ne!(a, b);
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..8])
}

/// A unique username suitable for `players.username`.
pub fn unique_username(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}
