//! Cursor-based pagination shared by every list operation.
//!
//! A list call takes [`ListOptions`] and returns a [`Page`]. The server mints an opaque
//! [`Cursor`] for the next page; the client only forwards it. Cursors are typed by the
//! item they enumerate, so a cursor from one resource's list cannot be handed to another.
//!
//! ```no_run
//! # use svix_client::{ListOptions, Svix};
//! # async fn example(svix: &Svix) -> svix_client::Result<()> {
//! let mut options = ListOptions::default().with_limit(50);
//! loop {
//!     let page = svix.applications().list(options.clone()).await?;
//!     for app in &page.items {
//!         println!("{}", app.name);
//!     }
//!     match page.next_options(options.limit) {
//!         Some(next) => options = next,
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{ClientError, Result};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

/// Opaque continuation token for a list of `T`.
pub struct Cursor<T> {
    token: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    /// Rebuild a cursor from a token previously returned by the server.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            _item: PhantomData,
        }
    }

    /// The token exactly as the server sent it.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Consume the cursor, returning its token.
    pub fn into_token(self) -> String {
        self.token
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self::from_token(self.token.clone())
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.token).finish()
    }
}

impl<'de, T> Deserialize<'de> for Cursor<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_token)
    }
}

/// Pagination parameters for a list call.
pub struct ListOptions<T> {
    /// Cursor from the previous page; `None` starts from the beginning.
    pub cursor: Option<Cursor<T>>,
    /// Maximum page size; `None` lets the server pick its default.
    pub limit: Option<u32>,
}

impl<T> ListOptions<T> {
    /// Options for the first page with the server's default page size.
    pub fn new() -> Self {
        Self {
            cursor: None,
            limit: None,
        }
    }

    /// Set the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from `cursor`.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Cursor<T>) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Validate and render as `iterator`/`limit` query parameters.
    pub(crate) fn query(&self) -> Result<Vec<(String, String)>> {
        let mut query = Vec::new();

        if let Some(cursor) = &self.cursor {
            if cursor.as_str().is_empty() {
                return Err(ClientError::InvalidArgument(
                    "cursor must not be empty".to_string(),
                ));
            }
            query.push(("iterator".to_string(), cursor.as_str().to_string()));
        }

        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(ClientError::InvalidArgument(
                    "limit must be a positive integer".to_string(),
                ));
            }
            query.push(("limit".to_string(), limit.to_string()));
        }

        Ok(query)
    }
}

impl<T> Default for ListOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ListOptions<T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            limit: self.limit,
        }
    }
}

impl<T> PartialEq for ListOptions<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor && self.limit == other.limit
    }
}

impl<T> fmt::Debug for ListOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOptions")
            .field("cursor", &self.cursor)
            .field("limit", &self.limit)
            .finish()
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Items in server order.
    #[serde(rename = "data")]
    pub items: Vec<T>,
    /// Cursor for the following page.
    #[serde(rename = "iterator", default)]
    pub next_cursor: Option<Cursor<T>>,
    /// Cursor for the preceding page.
    #[serde(rename = "prevIterator", default)]
    pub prev_cursor: Option<Cursor<T>>,
    /// `true` once no further page should be requested.
    pub done: bool,
}

impl<T> Page<T> {
    /// Options for the next page, or `None` when the enumeration is finished.
    pub fn next_options(&self, limit: Option<u32>) -> Option<ListOptions<T>> {
        if self.done {
            return None;
        }
        self.next_cursor.clone().map(|cursor| ListOptions {
            cursor: Some(cursor),
            limit,
        })
    }
}

/// Drain a list by feeding each page's cursor into the next call.
///
/// `fetch` is called once per page, first with `options`, then with the previous
/// page's cursor and the same limit, until a page reports `done`.
///
/// # Errors
///
/// Stops at and returns the first error from `fetch`.
pub async fn collect_all<T, F, Fut>(options: ListOptions<T>, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(ListOptions<T>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let limit = options.limit;
    let mut next = Some(options);
    let mut items = Vec::new();

    while let Some(options) = next.take() {
        let page = fetch(options).await?;
        next = page.next_options(limit);

        if next.is_none() && !page.done {
            tracing::warn!("Page is not done but carries no cursor; stopping");
        }

        items.extend(page.items);
    }

    Ok(items)
}
