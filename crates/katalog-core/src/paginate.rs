//! Cursor-following collection of paginated resource listings.
//!
//! The backend pages its collections and hands back an opaque next-page
//! cursor (a fully-formed URL in practice). [`collect_all`] follows that
//! cursor until exhaustion, fetching pages strictly sequentially: page N+1
//! cannot be requested before page N answered, because its cursor comes from
//! page N. Item order is preserved within and across pages so the backend's
//! sort parameter survives collection.
//!
//! Every page fetch goes through the retry executor. If a page still fails
//! after retries the whole collection fails; partial results are never
//! returned to the caller. A repeated cursor (a backend pagination bug)
//! terminates collection instead of looping forever.

use crate::retry::{self, RetryPolicy};
use crate::Result;
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, warn};

/// One page of items plus the cursor to the next page, if any.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page, in backend order.
    pub items: Vec<T>,
    /// Cursor for the following page; `None` on the last page.
    pub next_cursor: Option<String>,
}

/// Collects every item of a paginated listing.
///
/// `fetch_page` is called with `None` for the first page and with the
/// previous page's cursor afterwards. Collection stops when a page comes
/// back empty, reports no next cursor, or repeats a cursor already seen.
pub async fn collect_all<T, F, Fut>(policy: RetryPolicy, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut seen_cursors: HashSet<String> = HashSet::new();
    let mut page_index: u32 = 0;

    loop {
        let page = retry::execute(policy, || fetch_page(cursor.clone())).await?;
        debug!(
            page = page_index,
            page_items = page.items.len(),
            has_next = page.next_cursor.is_some(),
            "collected page"
        );

        let page_was_empty = page.items.is_empty();
        items.extend(page.items);
        page_index += 1;

        if page_was_empty {
            break;
        }
        match page.next_cursor {
            None => break,
            Some(next) => {
                if !seen_cursors.insert(next.clone()) {
                    // Backend handed back a cursor it already served; trust
                    // what we have rather than loop forever.
                    warn!(cursor = %next, "pagination cursor repeated, terminating collection");
                    break;
                }
                cursor = Some(next);
            },
        }
    }

    debug!(total = items.len(), pages = page_index, "collection complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Mutex;

    /// Scripted backend: each entry is one page served in order.
    fn serve(
        pages: Vec<Result<Page<u32>>>,
    ) -> impl FnMut(Option<String>) -> std::future::Ready<Result<Page<u32>>> {
        let queue = Mutex::new(pages.into_iter());
        move |_cursor| {
            let next = queue.lock().unwrap().next().unwrap_or_else(|| {
                Ok(Page {
                    items: vec![],
                    next_cursor: None,
                })
            });
            std::future::ready(next)
        }
    }

    fn page(items: Vec<u32>, next: Option<&str>) -> Result<Page<u32>> {
        Ok(Page {
            items,
            next_cursor: next.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn collects_pages_in_order_until_cursor_exhausted() {
        let fetch = serve(vec![
            page(vec![1, 2, 3], Some("p2")),
            page(vec![4, 5], Some("p3")),
            page(vec![6], None),
        ]);
        let items = collect_all(RetryPolicy::none(), fetch).await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn empty_page_terminates() {
        let fetch = serve(vec![page(vec![1, 2], Some("p2")), page(vec![], Some("p3"))]);
        let items = collect_all(RetryPolicy::none(), fetch).await.unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[tokio::test]
    async fn single_page_without_cursor() {
        let fetch = serve(vec![page(vec![9], None)]);
        let items = collect_all(RetryPolicy::none(), fetch).await.unwrap();
        assert_eq!(items, vec![9]);
    }

    #[tokio::test]
    async fn repeated_cursor_terminates_with_items_collected_so_far() {
        // A buggy backend that serves the same cursor forever.
        let fetch = serve(vec![
            page(vec![1], Some("loop")),
            page(vec![2], Some("loop")),
            page(vec![3], Some("loop")),
        ]);
        let items = collect_all(RetryPolicy::none(), fetch).await.unwrap();
        // First "loop" is accepted, the second repeats and stops collection.
        assert_eq!(items, vec![1, 2]);
    }

    #[tokio::test]
    async fn failing_page_fails_the_whole_collection() {
        let fetch = serve(vec![
            page(vec![1, 2], Some("p2")),
            Err(Error::Http {
                status: 500,
                url: "https://cms.example/jsonapi?page=2".to_string(),
            }),
        ]);
        let result = collect_all(RetryPolicy::none(), fetch).await;
        assert!(matches!(result, Err(Error::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn page_failure_is_retried_before_giving_up() {
        let fetch = serve(vec![
            Err(Error::Http {
                status: 503,
                url: "https://cms.example/jsonapi".to_string(),
            }),
            page(vec![7], None),
        ]);
        let policy = RetryPolicy {
            max_retries: 1,
            initial_delay: std::time::Duration::from_millis(1),
            max_delay: None,
        };
        let items = collect_all(policy, fetch).await.unwrap();
        assert_eq!(items, vec![7]);
    }
}
