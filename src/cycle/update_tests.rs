//! Tests for `UpdateCycle`.

use std::collections::VecDeque;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::network::{AddressResolver, AddressSet, IpVersion, ResolveError};
use crate::provider::{SubmitError, UpdateSubmitter};
use crate::state::mock::MockBaselineStore;
use crate::state::{BaselineStore, FileBaselineStore, LoadResult};
use crate::transport::HttpError;

use super::{CycleFailure, CycleOutcome, UpdateCycle};

/// Resolver with fixed answers that counts queries per family.
#[derive(Debug)]
struct FixedResolver {
    ipv4: Option<Ipv4Addr>,
    ipv6: Option<Ipv6Addr>,
    ipv6_calls: AtomicUsize,
}

impl FixedResolver {
    fn new(ipv4: Option<&str>, ipv6: Option<&str>) -> Self {
        Self {
            ipv4: ipv4.map(|s| s.parse().unwrap()),
            ipv6: ipv6.map(|s| s.parse().unwrap()),
            ipv6_calls: AtomicUsize::new(0),
        }
    }
}

impl AddressResolver for FixedResolver {
    async fn resolve_ipv4(&self) -> Result<Ipv4Addr, ResolveError> {
        self.ipv4.ok_or(ResolveError::EmptyBody)
    }

    async fn resolve_ipv6(&self) -> Result<Ipv6Addr, ResolveError> {
        self.ipv6_calls.fetch_add(1, Ordering::SeqCst);
        self.ipv6.ok_or(ResolveError::NoAddress)
    }
}

impl AddressResolver for Arc<FixedResolver> {
    async fn resolve_ipv4(&self) -> Result<Ipv4Addr, ResolveError> {
        (**self).resolve_ipv4().await
    }

    async fn resolve_ipv6(&self) -> Result<Ipv6Addr, ResolveError> {
        (**self).resolve_ipv6().await
    }
}

/// Submitter that returns queued results (success once the queue is empty).
#[derive(Debug, Default)]
struct MockSubmitter {
    results: Mutex<VecDeque<Result<String, SubmitError>>>,
    submissions: Mutex<Vec<AddressSet>>,
}

impl MockSubmitter {
    fn accepting() -> Self {
        Self::default()
    }

    fn rejecting(status: http::StatusCode) -> Self {
        let submitter = Self::default();
        submitter
            .results
            .lock()
            .unwrap()
            .push_back(Err(SubmitError::Rejected {
                status,
                body: "error".to_string(),
            }));
        submitter
    }

    fn submissions(&self) -> Vec<AddressSet> {
        self.submissions.lock().unwrap().clone()
    }
}

impl UpdateSubmitter for MockSubmitter {
    async fn submit(&self, addresses: &AddressSet) -> Result<String, SubmitError> {
        self.submissions.lock().unwrap().push(*addresses);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("addresses updated".to_string()))
    }
}

impl UpdateSubmitter for Arc<MockSubmitter> {
    async fn submit(&self, addresses: &AddressSet) -> Result<String, SubmitError> {
        (**self).submit(addresses).await
    }
}

fn ipv4_only(s: &str) -> AddressSet {
    AddressSet::new(Some(s.parse().unwrap()), None)
}

mod outcomes {
    use super::*;

    #[tokio::test]
    async fn ipv6_failure_submits_ipv4_only_and_persists_it() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            Arc::clone(&submitter),
            MockBaselineStore::not_found(),
        );

        let outcome = cycle.run().await;

        assert!(matches!(outcome, CycleOutcome::Updated(set) if set == ipv4_only("203.0.113.5")));
        assert_eq!(submitter.submissions(), vec![ipv4_only("203.0.113.5")]);
        assert_eq!(cycle.store().saved(), vec![ipv4_only("203.0.113.5")]);
        assert_eq!(cycle.store().saved()[0].encode(), "ipv4=203.0.113.5");
    }

    #[tokio::test]
    async fn unchanged_baseline_skips_without_submission() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            Arc::clone(&submitter),
            MockBaselineStore::with_loaded(ipv4_only("203.0.113.5")),
        );

        let outcome = cycle.run().await;

        assert!(matches!(outcome, CycleOutcome::Skipped));
        assert!(submitter.submissions().is_empty());
        assert!(cycle.store().saved().is_empty());
    }

    #[tokio::test]
    async fn rejected_submission_fails_and_keeps_baseline() {
        let previous = ipv4_only("198.51.100.1");
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            MockSubmitter::rejecting(http::StatusCode::INTERNAL_SERVER_ERROR),
            MockBaselineStore::with_loaded(previous),
        );

        let outcome = cycle.run().await;

        assert!(matches!(
            outcome,
            CycleOutcome::Failed(CycleFailure::Submission(SubmitError::Rejected { status, .. }))
                if status == http::StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert!(cycle.store().saved().is_empty());
        assert_eq!(cycle.store().load(), LoadResult::Loaded(previous));
    }

    #[tokio::test]
    async fn transport_failure_fails_and_keeps_baseline() {
        let submitter = MockSubmitter::default();
        submitter
            .results
            .lock()
            .unwrap()
            .push_back(Err(SubmitError::Http(HttpError::Timeout)));
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            submitter,
            MockBaselineStore::not_found(),
        );

        assert!(matches!(cycle.run().await, CycleOutcome::Failed(_)));
        assert!(cycle.store().saved().is_empty());
    }

    #[tokio::test]
    async fn no_addresses_aborts_without_side_effects() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(None, None),
            Arc::clone(&submitter),
            MockBaselineStore::with_loaded(ipv4_only("203.0.113.5")),
        );

        let outcome = cycle.run().await;

        assert!(matches!(outcome, CycleOutcome::Failed(CycleFailure::NoAddresses)));
        assert!(submitter.submissions().is_empty());
        assert!(cycle.store().saved().is_empty());
    }

    #[tokio::test]
    async fn save_failure_still_reports_updated() {
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            MockSubmitter::accepting(),
            MockBaselineStore::not_found().failing_saves(),
        );

        assert!(matches!(cycle.run().await, CycleOutcome::Updated(_)));
    }

    #[tokio::test]
    async fn corrupted_baseline_is_treated_as_empty() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            Arc::clone(&submitter),
            MockBaselineStore::corrupted("garbage"),
        );

        assert!(matches!(cycle.run().await, CycleOutcome::Updated(_)));
        assert_eq!(submitter.submissions().len(), 1);
        assert_eq!(cycle.store().load(), LoadResult::Loaded(ipv4_only("203.0.113.5")));
    }

    #[tokio::test]
    async fn dry_run_never_submits_or_persists() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1")),
            Arc::clone(&submitter),
            MockBaselineStore::not_found(),
        )
        .with_dry_run(true);

        assert!(matches!(cycle.run().await, CycleOutcome::Skipped));
        assert!(submitter.submissions().is_empty());
        assert!(cycle.store().saved().is_empty());
    }
}

mod ip_version {
    use super::*;

    #[tokio::test]
    async fn ipv4_only_mode_never_resolves_ipv6() {
        let resolver = Arc::new(FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1")));
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            Arc::clone(&resolver),
            Arc::clone(&submitter),
            MockBaselineStore::not_found(),
        )
        .with_ip_version(IpVersion::V4);

        cycle.run().await;

        assert_eq!(resolver.ipv6_calls.load(Ordering::SeqCst), 0);
        assert_eq!(submitter.submissions(), vec![ipv4_only("203.0.113.5")]);
    }

    #[tokio::test]
    async fn both_mode_submits_both_families() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1")),
            Arc::clone(&submitter),
            MockBaselineStore::not_found(),
        );

        cycle.run().await;

        assert_eq!(
            submitter.submissions()[0].encode(),
            "ipv4=203.0.113.5&ipv6=2001%3Adb8%3A%3A1"
        );
    }

    #[test]
    fn defaults_to_both() {
        let cycle = UpdateCycle::new((), (), ());
        assert_eq!(cycle.ip_version(), IpVersion::Both);
    }
}

mod across_cycles {
    use super::*;

    #[tokio::test]
    async fn two_unchanged_cycles_submit_once() {
        let submitter = Arc::new(MockSubmitter::accepting());
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), Some("2001:db8::1")),
            Arc::clone(&submitter),
            MockBaselineStore::not_found(),
        );

        assert!(matches!(cycle.run().await, CycleOutcome::Updated(_)));
        assert!(matches!(cycle.run().await, CycleOutcome::Skipped));
        assert_eq!(submitter.submissions().len(), 1);
    }

    #[tokio::test]
    async fn failed_cycle_is_retried_next_time() {
        let submitter = Arc::new(MockSubmitter::rejecting(http::StatusCode::BAD_GATEWAY));
        let cycle = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            Arc::clone(&submitter),
            MockBaselineStore::not_found(),
        );

        assert!(matches!(cycle.run().await, CycleOutcome::Failed(_)));
        assert!(matches!(cycle.run().await, CycleOutcome::Updated(_)));
        assert_eq!(submitter.submissions().len(), 2);
    }

    #[tokio::test]
    async fn baseline_file_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last.addr");

        let first = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            MockSubmitter::accepting(),
            FileBaselineStore::new(&path),
        );
        assert!(matches!(first.run().await, CycleOutcome::Updated(_)));

        let submitter = Arc::new(MockSubmitter::accepting());
        let restarted = UpdateCycle::new(
            FixedResolver::new(Some("203.0.113.5"), None),
            Arc::clone(&submitter),
            FileBaselineStore::new(&path),
        );

        assert!(matches!(restarted.run().await, CycleOutcome::Skipped));
        assert!(submitter.submissions().is_empty());
    }
}

#[test]
fn outcome_labels_and_display() {
    let updated = CycleOutcome::Updated(ipv4_only("203.0.113.5"));
    assert_eq!(updated.label(), "updated");
    assert_eq!(updated.to_string(), "updated (203.0.113.5)");
    assert_eq!(CycleOutcome::Skipped.label(), "skipped");

    let failed = CycleOutcome::Failed(CycleFailure::NoAddresses);
    assert_eq!(failed.label(), "failed");
    assert_eq!(failed.to_string(), "failed (no IP addresses available)");
}
