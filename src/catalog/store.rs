//! Entry list ownership and the fetch lifecycle
//!
//! `CatalogStore` owns the current ordered entry list and the flags the
//! UI renders around it (loading, error banner). Fetches run on worker
//! threads; the blocking client call happens there and the settled result
//! comes back over a channel as a [`NetResponse`], which the controller
//! loop feeds into [`CatalogStore::apply_list`].
//!
//! # Stale responses
//!
//! Every issued list/search request takes the next value of a monotonic
//! sequence. A settling response older than the newest issued request is
//! dropped, so a slow unfiltered load can never clobber the filtered list
//! the user asked for afterwards. Identify is not sequenced; the capture
//! session only permits one in flight.

use crate::api::{ApiError, CatalogClient, Creature, QueryParams};
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// A settled network call, routed back to the controller loop
#[derive(Debug)]
pub enum NetResponse {
    /// A list or search request settled
    List {
        /// Sequence the request was issued with
        seq: u64,
        result: Result<Vec<Creature>, ApiError>,
    },
    /// An identify submission settled
    Identified(Result<Creature, ApiError>),
}

/// Owner of the current entry list
pub struct CatalogStore {
    client: Arc<dyn CatalogClient>,
    responses: Sender<NetResponse>,
    entries: Vec<Creature>,
    loading: bool,
    error: Option<String>,
    /// Sequence of the newest issued list/search request
    issued_seq: u64,
}

impl CatalogStore {
    /// Create a store that fetches through `client` and reports settled
    /// calls on `responses`
    #[must_use]
    pub fn new(client: Arc<dyn CatalogClient>, responses: Sender<NetResponse>) -> Self {
        Self {
            client,
            responses,
            entries: Vec::new(),
            loading: false,
            error: None,
            issued_seq: 0,
        }
    }

    /// The current entry list, as the service returned it
    #[must_use]
    pub fn entries(&self) -> &[Creature] {
        &self.entries
    }

    /// Find an entry by identifier
    #[must_use]
    pub fn entry(&self, id: i64) -> Option<&Creature> {
        self.entries.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current error banner, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// User dismissed the error banner
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Fetch the unfiltered list
    ///
    /// Returns immediately; the result arrives as a [`NetResponse::List`].
    /// No automatic retry on failure.
    pub fn load(&mut self) {
        self.spawn_fetch(None);
    }

    /// Fetch the list filtered by `params`
    ///
    /// An empty `params` resets the server-side filter, equivalent to
    /// [`CatalogStore::load`].
    pub fn search(&mut self, params: QueryParams) {
        self.spawn_fetch(Some(params));
    }

    /// Resynchronize with the service; alias of [`CatalogStore::load`]
    pub fn refresh(&mut self) {
        self.load();
    }

    fn spawn_fetch(&mut self, params: Option<QueryParams>) {
        self.issued_seq += 1;
        let seq = self.issued_seq;
        self.loading = true;

        let client = Arc::clone(&self.client);
        let tx = self.responses.clone();

        thread::spawn(move || {
            let result = match params {
                Some(ref p) if !p.is_empty() => client.search(p),
                _ => client.list(),
            };
            // The receiver is gone during teardown; nothing to report to.
            let _ = tx.send(NetResponse::List { seq, result });
        });
    }

    /// Apply a settled list/search response
    ///
    /// Stale responses (older than the newest issued request) are
    /// dropped. On success the list is replaced and any error cleared;
    /// on failure the previous list stays and the error banner is set.
    pub fn apply_list(&mut self, seq: u64, result: Result<Vec<Creature>, ApiError>) {
        if seq < self.issued_seq {
            debug!(seq, newest = self.issued_seq, "dropping stale list response");
            return;
        }

        self.loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }
    }
}
