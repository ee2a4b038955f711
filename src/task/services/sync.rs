//! Live synchronisation of the task cache with the remote store.

use super::{TaskCache, TaskCacheReader, TaskList, TaskSyncError, TaskSyncResult};
use crate::config::BoardConfig;
use crate::task::{
    codec,
    domain::{Task, TaskId},
    ports::{CollectionQuery, Document, DocumentStore, SnapshotStream},
};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

/// Owner of the live task query and sole writer of the task cache.
///
/// Each snapshot delivered by the store replaces the cache wholesale. Stream
/// errors are logged and leave the previous list in place. Once
/// [`Self::unsubscribe`] returns, the cache no longer changes.
pub struct SyncEngine<S, C>
where
    S: DocumentStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
    query: CollectionQuery,
    cache: Arc<TaskCache>,
    listener: Mutex<Option<Listener>>,
}

/// Running snapshot consumer.
///
/// The consumer only writes the cache while holding `open` and seeing `true`,
/// so clearing it under the lock fences off any replacement in flight.
struct Listener {
    open: Arc<Mutex<bool>>,
    handle: JoinHandle<()>,
}

impl Listener {
    fn cancel(self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.handle.abort();
    }
}

impl<S, C> SyncEngine<S, C>
where
    S: DocumentStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an engine with an empty cache. No query is open until
    /// [`Self::subscribe`] is called.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, config: &BoardConfig) -> Self {
        Self {
            store,
            clock,
            query: config.task_query(),
            cache: Arc::new(TaskCache::new()),
            listener: Mutex::new(None),
        }
    }

    /// Returns a read-only handle to the task cache.
    #[must_use]
    pub fn cache(&self) -> TaskCacheReader {
        self.cache.reader()
    }

    /// Returns the query the engine listens to.
    #[must_use]
    pub const fn query(&self) -> &CollectionQuery {
        &self.query
    }

    /// Opens the live query and starts applying snapshots to the cache.
    ///
    /// Calling this while already subscribed does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::RemoteRead`] when the store refuses the
    /// subscription.
    pub async fn subscribe(&self) -> TaskSyncResult<()> {
        if self.is_subscribed() {
            tracing::debug!(collection = %self.query.collection(), "task query already open");
            return Ok(());
        }

        let stream = self.store.subscribe(&self.query).await.map_err(|err| {
            tracing::error!(
                collection = %self.query.collection(),
                error = %err,
                "failed to open task query"
            );
            TaskSyncError::RemoteRead(err)
        })?;

        let open = Arc::new(Mutex::new(true));
        let handle = tokio::spawn(apply_snapshots(
            stream,
            Arc::clone(&self.cache),
            Arc::clone(&self.clock),
            Arc::clone(&open),
            self.query.collection().to_owned(),
        ));

        let previous = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Listener { open, handle });
        if let Some(stale) = previous {
            stale.cancel();
        }
        tracing::info!(collection = %self.query.collection(), "task query opened");
        Ok(())
    }

    /// Returns `true` while the live query is running.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|listener| !listener.handle.is_finished())
    }

    /// Cancels the live query. Safe to call any number of times.
    ///
    /// Writes already in flight are unaffected.
    pub fn unsubscribe(&self) {
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(listener) = listener {
            listener.cancel();
            tracing::info!(collection = %self.query.collection(), "task query closed");
        }
    }

    /// Reads the whole collection once and replaces the cache with it.
    ///
    /// On failure the error is logged, the cache keeps its previous list and
    /// the error is returned; callers running in degraded mode may ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::RemoteRead`] when the read fails.
    pub async fn load_once(&self) -> TaskSyncResult<TaskList> {
        match self.store.get_all(&self.query).await {
            Ok(documents) => {
                let tasks = decode_all(documents, &*self.clock);
                tracing::debug!(
                    collection = %self.query.collection(),
                    count = tasks.len(),
                    "loaded task collection"
                );
                Ok(self.cache.replace(tasks))
            }
            Err(err) => {
                tracing::warn!(
                    collection = %self.query.collection(),
                    error = %err,
                    "one-shot task load failed; keeping cached tasks"
                );
                Err(TaskSyncError::RemoteRead(err))
            }
        }
    }
}

impl<S, C> Drop for SyncEngine<S, C>
where
    S: DocumentStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

fn decode_all(documents: Vec<Document>, clock: &impl Clock) -> Vec<Task> {
    documents
        .into_iter()
        .map(|document| {
            let (id, fields) = document.into_parts();
            codec::decode(TaskId::from(id), &fields, clock)
        })
        .collect()
}

async fn apply_snapshots<C>(
    mut stream: SnapshotStream,
    cache: Arc<TaskCache>,
    clock: Arc<C>,
    open: Arc<Mutex<bool>>,
    collection: String,
) where
    C: Clock + Send + Sync,
{
    while let Some(event) = stream.next().await {
        match event {
            Ok(documents) => {
                let tasks = decode_all(documents, &*clock);
                let count = tasks.len();
                {
                    let still_open = open.lock().unwrap_or_else(PoisonError::into_inner);
                    if !*still_open {
                        break;
                    }
                    cache.replace(tasks);
                }
                tracing::debug!(collection = %collection, count, "applied task snapshot");
            }
            Err(err) => {
                tracing::error!(
                    collection = %collection,
                    error = %err,
                    "task snapshot stream error; keeping cached tasks"
                );
            }
        }
    }
    tracing::debug!(collection = %collection, "task snapshot listener stopped");
}
