//! In-memory document store with live snapshot subscriptions.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::task::ports::{
    CollectionQuery, Document, DocumentFields, DocumentId, DocumentStore, DocumentStoreError,
    DocumentStoreResult, SnapshotEvent, SnapshotStream,
};

/// Thread-safe in-memory document store.
///
/// Documents keep their insertion order; ordered queries sort them stably by
/// the requested field. Every committed write pushes a fresh complete result
/// set to each open subscription on the affected collection. Read and write
/// failures can be injected to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    collections: HashMap<String, Vec<Document>>,
    subscribers: Vec<Subscriber>,
    read_failure: Option<DocumentStoreError>,
    write_failure: Option<DocumentStoreError>,
}

#[derive(Debug)]
struct Subscriber {
    query: CollectionQuery,
    sender: mpsc::UnboundedSender<SnapshotEvent>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read and subscribe call fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn fail_reads(&self, error: DocumentStoreError) -> DocumentStoreResult<()> {
        self.write_state()?.read_failure = Some(error);
        Ok(())
    }

    /// Makes every subsequent create, update and delete call fail with
    /// `error`.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn fail_writes(&self, error: DocumentStoreError) -> DocumentStoreResult<()> {
        self.write_state()?.write_failure = Some(error);
        Ok(())
    }

    /// Clears injected read and write failures.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn clear_failures(&self) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        state.read_failure = None;
        state.write_failure = None;
        Ok(())
    }

    /// Delivers `error` to every open subscription on `collection`.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn emit_stream_error(
        &self,
        collection: &str,
        error: DocumentStoreError,
    ) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        state.subscribers.retain(|subscriber| {
            subscriber.query.collection() != collection
                || subscriber.sender.send(Err(error.clone())).is_ok()
        });
        Ok(())
    }

    /// Stores a raw document body under a chosen identifier, bypassing any
    /// encoding. Used to seed partial or malformed records.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn put_raw(
        &self,
        collection: &str,
        id: DocumentId,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        let documents = state.collections.entry(collection.to_owned()).or_default();
        match documents.iter_mut().find(|document| document.id() == &id) {
            Some(existing) => *existing = Document::new(id, fields),
            None => documents.push(Document::new(id, fields)),
        }
        publish(&mut state, collection);
        Ok(())
    }

    /// Returns the raw documents of a collection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn documents(&self, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        let state = self.read_state()?;
        Ok(state.collections.get(collection).cloned().unwrap_or_default())
    }

    /// Returns the number of open subscriptions on `collection`.
    ///
    /// Subscriptions whose receiving stream has been dropped are not counted.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn subscriber_count(&self, collection: &str) -> DocumentStoreResult<usize> {
        let state = self.read_state()?;
        Ok(state
            .subscribers
            .iter()
            .filter(|subscriber| {
                subscriber.query.collection() == collection && !subscriber.sender.is_closed()
            })
            .count())
    }

    fn read_state(&self) -> DocumentStoreResult<RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> DocumentStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))
    }
}

/// Returns the documents of `query.collection` in query order.
fn run_query(state: &InMemoryStoreState, query: &CollectionQuery) -> Vec<Document> {
    let mut documents = state
        .collections
        .get(query.collection())
        .cloned()
        .unwrap_or_default();
    if let Some(field) = query.order_by() {
        documents.sort_by(|left, right| {
            compare_field(left.fields().get(field), right.fields().get(field))
        });
    }
    documents
}

/// Pushes a fresh result set to every live subscription on `collection` and
/// forgets subscriptions whose stream has been dropped.
fn publish(state: &mut InMemoryStoreState, collection: &str) {
    let mut subscribers = std::mem::take(&mut state.subscribers);
    subscribers.retain(|subscriber| {
        if subscriber.query.collection() != collection {
            return !subscriber.sender.is_closed();
        }
        let snapshot = run_query(state, &subscriber.query);
        subscriber.sender.send(Ok(snapshot)).is_ok()
    });
    state.subscribers = subscribers;
}

/// Orders values as missing < null < bool < number < string < anything else,
/// comparing within a kind by natural order.
fn compare_field(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(_) => 5,
        }
    }

    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&b.as_f64().unwrap_or_default()),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => rank(left).cmp(&rank(right)),
    }
}

fn check_failure(failure: Option<&DocumentStoreError>) -> DocumentStoreResult<()> {
    failure.map_or(Ok(()), |error| Err(error.clone()))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(
        &self,
        collection: &str,
        fields: DocumentFields,
    ) -> DocumentStoreResult<DocumentId> {
        let mut state = self.write_state()?;
        check_failure(state.write_failure.as_ref())?;
        let id = DocumentId::new(Uuid::new_v4().simple().to_string()).ok_or_else(|| {
            DocumentStoreError::backend(std::io::Error::other("generated empty document id"))
        })?;
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .push(Document::new(id.clone(), fields));
        publish(&mut state, collection);
        Ok(id)
    }

    async fn get_all(&self, query: &CollectionQuery) -> DocumentStoreResult<Vec<Document>> {
        let state = self.read_state()?;
        check_failure(state.read_failure.as_ref())?;
        Ok(run_query(&state, query))
    }

    async fn get_one(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> DocumentStoreResult<Option<Document>> {
        let state = self.read_state()?;
        check_failure(state.read_failure.as_ref())?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| document.id() == id))
            .cloned())
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        check_failure(state.write_failure.as_ref())?;
        let document = state
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| document.id() == id))
            .ok_or_else(|| DocumentStoreError::NotFound(id.clone()))?;
        let (doc_id, mut merged) = document.clone().into_parts();
        merged.extend(fields);
        *document = Document::new(doc_id, merged);
        publish(&mut state, collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()> {
        let mut state = self.write_state()?;
        check_failure(state.write_failure.as_ref())?;
        let removed = state.collections.get_mut(collection).is_some_and(|documents| {
            let before = documents.len();
            documents.retain(|document| document.id() != id);
            documents.len() != before
        });
        if removed {
            publish(&mut state, collection);
        }
        Ok(())
    }

    async fn subscribe(&self, query: &CollectionQuery) -> DocumentStoreResult<SnapshotStream> {
        let mut state = self.write_state()?;
        check_failure(state.read_failure.as_ref())?;
        let (sender, receiver) = mpsc::unbounded_channel();
        sender
            .send(Ok(run_query(&state, query)))
            .map_err(|err| DocumentStoreError::backend(std::io::Error::other(err.to_string())))?;
        state.subscribers.push(Subscriber {
            query: query.clone(),
            sender,
        });
        Ok(SnapshotStream::new(receiver))
    }
}
