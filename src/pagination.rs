//! Exhaustive pagination over paged list endpoints
//!
//! GitLab list responses report their position via `x-page` and
//! `x-total-pages`; [`drain_pages`] keeps fetching until the reported
//! current page reaches the reported total. The cursor is parameterized
//! purely by the fetch operation, so the same code drains subgroup,
//! project, and member listings.

use std::future::Future;

use crate::api::Page;
use crate::error::ApiResult;

/// Drain a paginated listing to completion, starting at page 1.
///
/// Stops once the returned `current_page` reaches `total_pages`. The first
/// fetch error is surfaced immediately; items accumulated before the
/// failure are dropped along with it.
pub async fn drain_pages<T, F, Fut>(mut fetch: F) -> ApiResult<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ApiResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch(page).await?;
        items.extend(batch.items);

        if batch.current_page >= batch.total_pages {
            break;
        }
        page = batch.current_page + 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::cell::Cell;

    #[tokio::test]
    async fn drains_every_page() {
        let calls = Cell::new(0u32);

        let items = drain_pages(|page| {
            calls.set(calls.get() + 1);
            async move {
                Ok(match page {
                    1 => Page {
                        items: vec![1, 2],
                        current_page: 1,
                        total_pages: 3,
                    },
                    2 => Page {
                        items: vec![3],
                        current_page: 2,
                        total_pages: 3,
                    },
                    3 => Page {
                        items: vec![4, 5],
                        current_page: 3,
                        total_pages: 3,
                    },
                    _ => panic!("fetched past the last page"),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 3);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn single_page_listing_fetches_once() {
        let calls = Cell::new(0u32);

        let items = drain_pages(|_page| {
            calls.set(calls.get() + 1);
            async move {
                Ok(Page {
                    items: vec!["only"],
                    current_page: 1,
                    total_pages: 1,
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(items, vec!["only"]);
    }

    #[tokio::test]
    async fn empty_listing_stops_after_first_fetch() {
        let calls = Cell::new(0u32);

        let items: Vec<u32> = drain_pages(|_page| {
            calls.set(calls.get() + 1);
            async move {
                Ok(Page {
                    items: vec![],
                    current_page: 1,
                    total_pages: 0,
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn error_short_circuits_remaining_pages() {
        let calls = Cell::new(0u32);

        let err = drain_pages::<u32, _, _>(|page| {
            calls.set(calls.get() + 1);
            async move {
                match page {
                    1 => Ok(Page {
                        items: vec![1, 2],
                        current_page: 1,
                        total_pages: 5,
                    }),
                    2 => Err(ApiError::Status {
                        url: "https://gitlab.example.com/api/v4/groups/1/members".into(),
                        status: 500,
                    }),
                    _ => panic!("fetched past the failing page"),
                }
            }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.get(), 2);
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}
