use crate::{
    data::{CapturedRequest, RequestData},
    error::Error,
};
use chrono::Utc;
use std::{
    collections::VecDeque,
    sync::{Arc, RwLock},
};

pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded, oldest-first history of captured requests.
///
/// All access goes through a single readers-writer lock. Records are stored
/// behind `Arc`, so `list` and `find` hand out snapshots that later appends
/// or clears cannot affect.
#[derive(Debug)]
pub struct CaptureStore {
    capacity: usize,
    history: RwLock<History>,
}

#[derive(Debug)]
struct History {
    requests: VecDeque<Arc<CapturedRequest>>,
    // Survives eviction and clear so ids are never reused.
    last_id: u64,
}

impl CaptureStore {
    pub fn new() -> Self {
        Self::bounded(DEFAULT_CAPACITY)
    }

    #[cfg(test)]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capture store capacity must be positive");

        Self::bounded(capacity)
    }

    fn bounded(capacity: usize) -> Self {
        Self {
            capacity,
            history: RwLock::new(History {
                requests: VecDeque::with_capacity(capacity + 1),
                last_id: 0,
            }),
        }
    }

    /// Stores `request_data` under the next id and returns that id, evicting
    /// the oldest records once the history grows past capacity.
    pub fn append(&self, request_data: RequestData) -> Result<u64, Error> {
        let mut history = self.history.write()?;
        // stamped under the lock so timestamps follow id order
        let received_at = Utc::now();

        let id = history.last_id + 1;
        history.last_id = id;
        history
            .requests
            .push_back(Arc::new(CapturedRequest::from_request_data(
                id,
                received_at,
                request_data,
            )));

        while history.requests.len() > self.capacity {
            if let Some(evicted) = history.requests.pop_front() {
                tracing::debug!(id = evicted.id, "evicted captured request");
            }
        }

        Ok(id)
    }

    pub fn find(&self, id: u64) -> Result<Arc<CapturedRequest>, Error> {
        let history = self.history.read()?;

        // Ids only ever grow, so the deque is sorted by id.
        history
            .requests
            .binary_search_by_key(&id, |request| request.id)
            .map(|index| history.requests[index].clone())
            .map_err(|_| Error::NotFound(id.to_string()))
    }

    pub fn list(&self) -> Result<Vec<Arc<CapturedRequest>>, Error> {
        let history = self.history.read()?;

        Ok(history.requests.iter().cloned().collect())
    }

    /// Drops every stored record. The id counter is left untouched.
    pub fn clear(&self) -> Result<(), Error> {
        self.history.write()?.requests.clear();

        Ok(())
    }

    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.history.read()?.requests.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.history.read()?.requests.is_empty())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CaptureStore {
    fn default() -> Self {
        Self::new()
    }
}
