//! Test support utilities: unique test data and logging bootstrap.

pub mod logging;

use ulid::Ulid;

/// Generate a unique string with the given prefix, for test isolation.
///
/// # Examples
/// ```
/// use test_support::unique_str;
///
/// let a = unique_str("player");
/// let b = unique_str("player");
/// assert_ne!(a, b);
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_str_produces_different_results() {
        assert_ne!(unique_str("x"), unique_str("x"));
    }
}
