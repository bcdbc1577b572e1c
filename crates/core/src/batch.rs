// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bounded-parallelism batch mapping.
//!
//! ## Invariants
//!
//! - At most `limit` mapper futures are in flight at any time
//! - Output index `i` always holds the result for input index `i`
//! - Each output slot is written exactly once
//! - The first mapper error aborts the batch; callers that need partial
//!   tolerance must catch inside their mapper and return a fallback

use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// Maps `items` through an async `mapper` with at most `limit` calls in flight.
///
/// The mapper receives each item together with its input index. Results are
/// returned in input order regardless of completion order. A `limit` of 0 is
/// treated as 1.
///
/// # Errors
///
/// Returns the first error produced by `mapper`. Mappers still running when
/// the error surfaces are dropped.
pub async fn bounded_concurrent_map<T, R, E, F, Fut>(
    items: Vec<T>,
    limit: usize,
    mapper: F,
) -> Result<Vec<R>, E>
where
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let total: usize = items.len();
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();

    let mut in_flight = std::pin::pin!(
        stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| {
                let pending: Fut = mapper(item, index);
                async move { pending.await.map(|value| (index, value)) }
            })
            .buffer_unordered(limit.max(1))
    );

    while let Some((index, value)) = in_flight.try_next().await? {
        slots[index] = Some(value);
    }

    // Every index was yielded exactly once by the stream above.
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_results_are_index_aligned() {
        // Later items finish first.
        let delays: Vec<u64> = vec![50, 40, 30, 20, 10];

        let results: Vec<usize> = bounded_concurrent_map(delays, 2, |delay, index| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<usize, ()>(index * 10)
        })
        .await
        .unwrap();

        assert_eq!(results, vec![0, 10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<u32> = (0..12).collect();
        let results = bounded_concurrent_map(items, 3, |item, _| {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok::<u32, ()>(item + 1)
            }
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 12);
        assert_eq!(results[11], 12);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<u8> =
            bounded_concurrent_map(Vec::<u8>::new(), 4, |item, _| async move {
                Ok::<u8, ()>(item)
            })
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_zero_limit_still_runs() {
        let results = bounded_concurrent_map(vec![1, 2, 3], 0, |item, _| async move {
            Ok::<i32, ()>(item * 2)
        })
        .await
        .unwrap();

        assert_eq!(results, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn test_error_aborts_batch() {
        let result = bounded_concurrent_map(vec![1, 2, 3, 4, 5], 2, |item, _| async move {
            if item == 3 {
                Err(format!("item {item} failed"))
            } else {
                Ok(item)
            }
        })
        .await;

        assert_eq!(result, Err(String::from("item 3 failed")));
    }

    #[tokio::test]
    async fn test_mapper_fallback_keeps_batch_alive() {
        let results = bounded_concurrent_map(vec![1, 2, 3, 4, 5], 2, |item, _| async move {
            let fetched: Result<i32, String> = if item % 2 == 0 {
                Err(String::from("upstream down"))
            } else {
                Ok(item)
            };
            Ok::<i32, String>(fetched.unwrap_or(-1))
        })
        .await
        .unwrap();

        assert_eq!(results, vec![1, -1, 3, -1, 5]);
    }
}
