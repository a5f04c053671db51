// Concurrency-facing tests for the revocation registry
//
// The registry is the only shared mutable state in the kernel; these tests
// exercise the visibility guarantee across threads: a jti revoked anywhere
// is immediately revoked everywhere.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use auth_core::RevocationRegistry;
use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn revocation_is_visible_across_threads() {
    let registry = Arc::new(RevocationRegistry::new());
    let expires_at = Utc::now() + Duration::minutes(15);

    let jti = Uuid::new_v4();
    let revoked = Arc::new(AtomicBool::new(false));

    // Readers poll until they observe the revocation flag, then the
    // registry itself must already agree.
    let mut readers = Vec::new();
    for _ in 0..4 {
        let registry = registry.clone();
        let revoked = revoked.clone();
        readers.push(thread::spawn(move || {
            while !revoked.load(Ordering::Acquire) {
                thread::yield_now();
            }
            assert!(registry.is_revoked(&jti));
        }));
    }

    assert!(!registry.is_revoked(&jti));
    registry.revoke(jti, expires_at);
    revoked.store(true, Ordering::Release);

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
}

#[test]
fn concurrent_revocations_of_the_same_jti_collapse_to_one_entry() {
    let registry = Arc::new(RevocationRegistry::new());
    let expires_at = Utc::now() + Duration::minutes(15);
    let jti = Uuid::new_v4();

    let mut writers = Vec::new();
    for _ in 0..8 {
        let registry = registry.clone();
        writers.push(thread::spawn(move || {
            registry.revoke(jti, expires_at);
        }));
    }
    for writer in writers {
        writer.join().expect("writer thread panicked");
    }

    assert!(registry.is_revoked(&jti));
    assert_eq!(registry.len(), 1);
}

#[test]
fn compaction_races_cleanly_with_writers() {
    let registry = Arc::new(RevocationRegistry::new());
    let now = Utc::now();

    // Seed entries that are already past their natural expiry
    for _ in 0..128 {
        registry.revoke(Uuid::new_v4(), now - Duration::minutes(1));
    }

    let live: Vec<Uuid> = (0..32).map(|_| Uuid::new_v4()).collect();

    let writer = {
        let registry = registry.clone();
        let live = live.clone();
        thread::spawn(move || {
            for jti in live {
                registry.revoke(jti, now + Duration::minutes(30));
            }
        })
    };
    let compactor = {
        let registry = registry.clone();
        thread::spawn(move || registry.compact(now))
    };

    writer.join().expect("writer thread panicked");
    compactor.join().expect("compactor thread panicked");

    // A second compaction with no writers drains the rest of the expired set
    registry.compact(now);

    for jti in &live {
        assert!(registry.is_revoked(jti));
    }
    assert_eq!(registry.len(), live.len());
}
