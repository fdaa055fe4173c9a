//! Policy for suites that need an embedded PostgreSQL cluster.
//!
//! Hosts without the PostgreSQL binaries (or without network access to fetch
//! them) skip these suites with a `SKIP-TEST-CLUSTER` marker. CI sets
//! `ENROLLMENT_REQUIRE_TEST_CLUSTER=1` so a broken cluster fails loudly.

const REQUIRE_CLUSTER_VAR: &str = "ENROLLMENT_REQUIRE_TEST_CLUSTER";

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Whether an unavailable cluster must fail the run instead of skipping.
pub fn cluster_required() -> bool {
    std::env::var(REQUIRE_CLUSTER_VAR)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

/// Report a cluster setup failure: skip with a marker, or panic when the
/// cluster is required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("test cluster setup failed: {reason}; unset {REQUIRE_CLUSTER_VAR} to skip");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

#[cfg(test)]
mod tests {
    use env_lock::lock_env;
    use rstest::rstest;

    use super::{REQUIRE_CLUSTER_VAR, handle_cluster_setup_failure, is_truthy};

    #[rstest]
    #[case("1", true)]
    #[case("TRUE", true)]
    #[case("yes", true)]
    #[case("0", false)]
    #[case("", false)]
    fn truthy_values(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_truthy(raw), expected);
    }

    #[rstest]
    fn unavailable_cluster_skips_by_default() {
        let _guard = lock_env([(REQUIRE_CLUSTER_VAR, None::<String>)]);

        assert!(handle_cluster_setup_failure::<()>("no binaries").is_none());
    }

    #[rstest]
    fn unavailable_cluster_fails_when_required() {
        let _guard = lock_env([(REQUIRE_CLUSTER_VAR, Some("1".to_owned()))]);

        let outcome = std::panic::catch_unwind(|| handle_cluster_setup_failure::<()>("no binaries"));

        assert!(outcome.is_err());
    }
}
