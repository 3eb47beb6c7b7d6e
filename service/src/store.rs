use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use sapper_core::{GameSession, SessionId};
use sapper_protocol::{decode_session, encode_session};

use crate::StoreError;

/// Backing storage for active sessions.
///
/// `save` is an upsert keyed by the session id. Implementations decide how to keep concurrent writers to the same id
/// apart, the engine itself never locks.
pub trait SessionStore {
    fn load(&self, id: &SessionId) -> Result<GameSession, StoreError>;
    fn save(&self, session: &GameSession) -> Result<GameSession, StoreError>;
    fn delete(&self, id: &SessionId) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn load(&self, id: &SessionId) -> Result<GameSession, StoreError> {
        (**self).load(id)
    }

    fn save(&self, session: &GameSession) -> Result<GameSession, StoreError> {
        (**self).save(session)
    }

    fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}

/// Keeps encoded session records in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<SessionId, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Raw stored record, as it would sit in an external key-value store.
    pub fn record(&self, id: &SessionId) -> Result<Option<String>, StoreError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<SessionId, String>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, id: &SessionId) -> Result<GameSession, StoreError> {
        let records = self.records()?;
        let record = records.get(id).ok_or(StoreError::NotFound(*id))?;
        Ok(decode_session(record)?)
    }

    fn save(&self, session: &GameSession) -> Result<GameSession, StoreError> {
        let record = encode_session(session)?;
        let stored = decode_session(&record)?;
        self.records()?.insert(session.id(), record);
        Ok(stored)
    }

    fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        self.records()?
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }
}
