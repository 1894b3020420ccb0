use futures::{StreamExt, TryStreamExt, stream};
use std::future::Future;

use crate::core::Result;

/// Run `f` for every ticker with at most `concurrency` requests in flight.
///
/// Results come back in ticker order and the first error aborts the rest.
/// A concurrency of 1 (or 0) is strictly sequential.
pub(crate) async fn per_ticker<'a, T, F, Fut>(
    tickers: &'a [String],
    concurrency: usize,
    f: F,
) -> Result<Vec<T>>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    stream::iter(tickers.iter().map(String::as_str))
        .map(f)
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
