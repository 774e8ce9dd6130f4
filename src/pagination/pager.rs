//! Cursor-following listing pager
//!
//! Turns a paginated listing endpoint into one ordered stream of items.

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::thing::{ItemSequence, Normalized};
use crate::types::DEFAULT_PAGE_LIMIT;
use futures::future::BoxFuture;
use futures::{FutureExt, Stream};
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// Entry point for paginated and single-thing fetches
#[derive(Debug, Clone)]
pub struct ListingPager {
    client: HttpClient,
    page_limit: u32,
}

impl ListingPager {
    /// Create a pager requesting 100 items per page
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Set the `limit` sent with every page request
    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Stream every item of the listing at `path`, page after page.
    ///
    /// Nothing is requested until the stream is first polled. Each call
    /// starts again from the first page.
    pub fn paginate(&self, path: impl Into<String>, options: RequestOptions) -> ListingStream {
        ListingStream {
            client: self.client.clone(),
            path: path.into(),
            options,
            page_limit: self.page_limit,
            pages_fetched: 0,
            state: PagerState::Pending(None),
        }
    }

    /// Fetch a single thing by fullname (e.g. `t3_abc123`)
    pub async fn fetch_by_id(&self, id: &str, options: &RequestOptions) -> Result<Normalized> {
        self.client
            .request_normalized(&format!("by_id/{id}"), options)
            .await
    }
}

type PageFuture = BoxFuture<'static, Result<ItemSequence>>;

enum PagerState {
    /// Next page not requested yet; `None` is the first page
    Pending(Option<String>),
    /// Page request in flight
    Fetching(PageFuture),
    /// Serving items of the current page
    Holding {
        items: std::vec::IntoIter<Normalized>,
        after: Option<String>,
    },
    /// Last page drained, or an error was yielded
    Done,
}

/// Lazy stream over all items of a listing.
///
/// Items come out in API order, page by page. An error ends the stream after
/// it is yielded; items yielded before it stay valid.
pub struct ListingStream {
    client: HttpClient,
    path: String,
    options: RequestOptions,
    page_limit: u32,
    pages_fetched: usize,
    state: PagerState,
}

impl ListingStream {
    /// Number of pages received so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query for one page: `limit` (and `after`), with caller options on top
    fn page_options(&self, cursor: Option<&str>) -> RequestOptions {
        let mut defaults = RequestOptions::new().query("limit", self.page_limit.to_string());
        if let Some(cursor) = cursor {
            defaults = defaults.query("after", cursor);
        }
        self.options.merged_over(&defaults)
    }

    fn fetch(&self, cursor: Option<String>) -> PageFuture {
        let client = self.client.clone();
        let path = self.path.clone();
        let options = self.page_options(cursor.as_deref());

        async move {
            client
                .request_normalized(&path, &options)
                .await?
                .into_listing(&path)
        }
        .boxed()
    }
}

impl Stream for ListingStream {
    type Item = Result<Normalized>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match std::mem::replace(&mut this.state, PagerState::Done) {
                PagerState::Pending(cursor) => {
                    this.state = PagerState::Fetching(this.fetch(cursor));
                }
                PagerState::Fetching(mut page) => match page.poll_unpin(cx) {
                    Poll::Pending => {
                        this.state = PagerState::Fetching(page);
                        return Poll::Pending;
                    }
                    Poll::Ready(Ok(page)) => {
                        this.pages_fetched += 1;
                        let (items, metadata) = page.into_parts();
                        let after = metadata
                            .after()
                            .filter(|cursor| !cursor.is_empty())
                            .map(str::to_string);
                        debug!(
                            "Page {} of {}: {} items, after={:?}",
                            this.pages_fetched,
                            this.path,
                            items.len(),
                            after
                        );
                        this.state = PagerState::Holding {
                            items: items.into_iter(),
                            after,
                        };
                    }
                    Poll::Ready(Err(e)) => return Poll::Ready(Some(Err(e))),
                },
                PagerState::Holding { mut items, after } => {
                    if let Some(item) = items.next() {
                        this.state = PagerState::Holding { items, after };
                        return Poll::Ready(Some(Ok(item)));
                    }
                    match after {
                        Some(cursor) => this.state = PagerState::Pending(Some(cursor)),
                        None => return Poll::Ready(None),
                    }
                }
                PagerState::Done => return Poll::Ready(None),
            }
        }
    }
}

impl std::fmt::Debug for ListingStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingStream")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("page_limit", &self.page_limit)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
