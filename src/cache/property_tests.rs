//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check freshness, forced refresh and invalidation over
//! arbitrary durations and operation sequences.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use proptest::prelude::*;

use crate::cache::testing::ScriptedUpstream;
use crate::cache::{ExpiryPolicy, FetchCache, ManualClock};
use crate::error::FetchError;

// == Test Configuration ==
const TEST_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

type TestCache = FetchCache<Arc<ScriptedUpstream>, Arc<ManualClock>>;

fn build_cache(ttl_secs: u64) -> (TestCache, Arc<ScriptedUpstream>, Arc<ManualClock>) {
    let upstream = Arc::new(ScriptedUpstream::counting());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let cache = FetchCache::with_clock(
        "prop",
        upstream.clone(),
        clock.clone(),
        ExpiryPolicy::fixed(Duration::from_secs(ttl_secs)),
        TEST_FETCH_TIMEOUT,
    );
    (cache, upstream, clock)
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Get,
    ForceGet,
    Invalidate,
    Advance(i64),
    Fail,
    Recover,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => Just(CacheOp::Get),
        1 => Just(CacheOp::ForceGet),
        1 => Just(CacheOp::Invalidate),
        2 => (0i64..120).prop_map(CacheOp::Advance),
        1 => Just(CacheOp::Fail),
        1 => Just(CacheOp::Recover),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* duration d and read offset o, a read at t + o is a hit iff o < d.
    #[test]
    fn prop_freshness_window(ttl in 1u64..3600, offset in 0u64..7200) {
        tokio_test::block_on(async {
            let (cache, upstream, clock) = build_cache(ttl);

            let first = cache.get(false).await.unwrap();
            clock.advance(ChronoDuration::seconds(offset as i64));
            let second = cache.get(false).await.unwrap();

            if offset < ttl {
                prop_assert_eq!(upstream.calls(), 1);
                prop_assert_eq!(second, first);
            } else {
                prop_assert_eq!(upstream.calls(), 2);
                prop_assert_ne!(second, first);
            }
            Ok(())
        })?;
    }

    // *For any* freshness state, a forced read calls upstream exactly once.
    #[test]
    fn prop_force_refresh_always_fetches(ttl in 1u64..3600, offset in 0u64..7200) {
        tokio_test::block_on(async {
            let (cache, upstream, clock) = build_cache(ttl);

            cache.get(false).await.unwrap();
            clock.advance(ChronoDuration::seconds(offset as i64));
            cache.get(true).await.unwrap();

            prop_assert_eq!(upstream.calls(), 2);
            Ok(())
        })?;
    }

    // Model check: the cache's decisions match a simple reference model, and
    // failures never disturb the stored entry.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        const TTL: i64 = 60;

        tokio_test::block_on(async {
            let (cache, upstream, clock) = build_cache(TTL as u64);

            // (value, expires_at in seconds since start)
            let mut model: Option<(u32, i64)> = None;
            let mut now: i64 = 0;
            let mut failing = false;

            for op in ops {
                match op {
                    CacheOp::Get | CacheOp::ForceGet => {
                        let force = matches!(op, CacheOp::ForceGet);
                        let calls_before = upstream.calls();
                        let result = cache.get(force).await;

                        let hit = !force && matches!(model, Some((_, exp)) if now < exp);
                        if hit {
                            prop_assert_eq!(upstream.calls(), calls_before);
                            prop_assert_eq!(result.unwrap(), vec![model.unwrap().0]);
                        } else {
                            prop_assert_eq!(upstream.calls(), calls_before + 1);
                            if failing {
                                prop_assert!(result.is_err());
                            } else {
                                let value = upstream.calls() as u32;
                                prop_assert_eq!(result.unwrap(), vec![value]);
                                model = Some((value, now + TTL));
                            }
                        }
                    }
                    CacheOp::Invalidate => {
                        cache.invalidate().await;
                        model = None;
                    }
                    CacheOp::Advance(secs) => {
                        clock.advance(ChronoDuration::seconds(secs));
                        now += secs;
                    }
                    CacheOp::Fail => {
                        upstream.fail_with(FetchError::Timeout);
                        failing = true;
                    }
                    CacheOp::Recover => {
                        upstream.recover();
                        failing = false;
                    }
                }

                prop_assert_eq!(cache.peek().await.is_some(), model.is_some());
            }
            Ok(())
        })?;
    }

    // *For any* number of consecutive invalidations, the cache ends up empty
    // and the next read goes upstream.
    #[test]
    fn prop_invalidate_idempotent(times in 1usize..10) {
        tokio_test::block_on(async {
            let (cache, upstream, _clock) = build_cache(300);

            cache.get(false).await.unwrap();
            for _ in 0..times {
                cache.invalidate().await;
            }

            prop_assert!(cache.peek().await.is_none());
            prop_assert_eq!(cache.stats().await.invalidations, times as u64);

            cache.get(false).await.unwrap();
            prop_assert_eq!(upstream.calls(), 2);
            Ok(())
        })?;
    }
}
