//! Join that waits for every future and keeps each outcome, never failing fast.

use futures::future::join_all;
use std::future::Future;

/// Runs every future concurrently and returns each outcome in input order.
#[allow(dead_code)]
pub async fn settle_all<I, F, T, E>(futures: I) -> Vec<Result<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(futures).await
}

/// The two-future case of [`settle_all`] for outcomes of different types. A
/// failure on one side neither cancels nor short-circuits the other.
pub async fn settle_pair<A, B, TA, EA, TB, EB>(a: A, b: B) -> (Result<TA, EA>, Result<TB, EB>)
where
    A: Future<Output = Result<TA, EA>>,
    B: Future<Output = Result<TB, EB>>,
{
    futures::join!(a, b)
}
