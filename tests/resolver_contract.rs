//! Contract tests shared by every resolver implementation
//!
//! Each resolver is run through the same scenarios so that trades resolve the
//! same way whichever reference-data source sits behind them.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tradelink_tests::*;

struct ResolverCase {
    name: &'static str,
    resolver: Box<dyn Resolver<FutureSecurity> + Send + Sync>,
}

/// Every resolver shape, each backed by reference data holding F123 and F456.
fn resolver_cases() -> Vec<ResolverCase> {
    vec![
        ResolverCase {
            name: "in-memory",
            resolver: Box::new(registry(&["F123", "F456"])),
        },
        ResolverCase {
            name: "caching",
            resolver: Box::new(CachingResolver::<_, FutureSecurity>::with_default_config(
                registry(&["F123", "F456"]),
            )),
        },
        ResolverCase {
            name: "chain",
            resolver: Box::new(
                ChainResolver::<FutureSecurity>::new()
                    .with("primary", registry(&["F123"]))
                    .with("secondary", registry(&["F456"])),
            ),
        },
    ]
}

#[test_log::test]
fn known_identifiers_resolve_for_all_resolvers() {
    for case in resolver_cases() {
        for value in ["F123", "F456"] {
            let trade = unresolved_trade(value)
                .resolve_links(case.resolver.as_ref())
                .unwrap_or_else(|error| panic!("resolver '{}' failed: {error}", case.name));
            assert_eq!(
                trade.security().expect("resolved"),
                &future_security(value),
                "resolver '{}': resolved security",
                case.name
            );
        }
    }
}

#[test_log::test]
fn unknown_identifiers_fail_for_all_resolvers() {
    for case in resolver_cases() {
        let trade = unresolved_trade("F999");
        let err = trade
            .resolve_links(case.resolver.as_ref())
            .expect_err("unknown identifier must fail");

        assert_eq!(err.identifier(), &future_id("F999"), "resolver '{}'", case.name);
        assert!(
            err.cause().downcast_ref::<LookupError>().is_some(),
            "resolver '{}': cause should be a lookup error",
            case.name
        );
        assert!(!trade.security_link().is_resolved());
    }
}

#[test_log::test]
fn chain_reports_every_failed_attempt() {
    let chain = ChainResolver::<FutureSecurity>::new()
        .with("primary", registry(&["F123"]))
        .with("secondary", registry(&["F456"]));

    let err = unresolved_trade("F999")
        .resolve_links(&chain)
        .expect_err("must fail");

    match err.cause().downcast_ref::<LookupError>() {
        Some(LookupError::Exhausted { attempts, .. }) => {
            let names: Vec<_> = attempts.iter().map(|attempt| attempt.resolver.as_str()).collect();
            assert_eq!(names, ["primary", "secondary"]);
        }
        other => panic!("expected exhausted lookup, got {other:?}"),
    }
}

#[test_log::test]
fn caching_resolver_shares_results_across_trades() {
    // Given: A cache in front of a backend that counts lookups
    let lookups = Arc::new(AtomicU32::new(0));
    let backend = {
        let lookups = Arc::clone(&lookups);
        let reference = registry(&["F123"]);
        move |id: &StandardId, target: TargetType<FutureSecurity>| -> Result<FutureSecurity, ResolveCause> {
            lookups.fetch_add(1, Ordering::SeqCst);
            reference.resolve(id, target)
        }
    };
    let cache: CachingResolver<_, FutureSecurity> = CachingResolver::new(
        backend,
        CacheConfig {
            ttl: Duration::from_secs(60),
            max_entries: 16,
        },
    );

    // When: Several trades on the same future are resolved
    let trades: Vec<_> = (0..3)
        .map(|_| unresolved_trade("F123").resolve_links(&cache).expect("resolves"))
        .collect();

    // Then: The backend was consulted once and every trade sees the same security
    assert_eq!(lookups.load(Ordering::SeqCst), 1);
    assert!(trades.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(cache.len(), 1);
}

#[test_log::test]
fn caching_resolver_does_not_remember_failures() {
    let lookups = AtomicU32::new(0);
    let backend = |_: &StandardId, _: TargetType<FutureSecurity>| -> Result<FutureSecurity, ResolveCause> {
        lookups.fetch_add(1, Ordering::SeqCst);
        Err("reference data offline".into())
    };
    let cache: CachingResolver<_, FutureSecurity> = CachingResolver::with_default_config(backend);

    let trade = unresolved_trade("F123");
    assert!(trade.resolve_links(&cache).is_err());
    assert!(trade.resolve_links(&cache).is_err());

    assert_eq!(lookups.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}

#[test_log::test]
fn caching_resolver_with_unbounded_ttl_resolves_without_panicking() {
    let cache: CachingResolver<_, FutureSecurity> = CachingResolver::new(
        registry(&["F123"]),
        CacheConfig {
            ttl: Duration::MAX,
            max_entries: 4,
        },
    );

    let first = unresolved_trade("F123").resolve_links(&cache).expect("resolves");
    let second = unresolved_trade("F123").resolve_links(&cache).expect("resolves");

    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test_log::test]
fn resolved_trades_are_shareable_across_threads() {
    let trade = Arc::new(
        unresolved_trade("F123")
            .resolve_links(&registry(&["F123"]))
            .expect("resolves"),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let trade = Arc::clone(&trade);
            std::thread::spawn(move || trade.security().map(|security| security.name().to_owned()))
        })
        .collect();

    for handle in handles {
        let name = handle.join().expect("thread completes").expect("resolved");
        assert_eq!(name, "Future F123");
    }
}
