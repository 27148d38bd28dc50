//! Session storage with a freshness window.

use std::marker::PhantomData;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Cache, CacheError, KvStore};

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Envelope stored for every session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    /// The session ID.
    pub id: SessionId,
    /// User-defined session data.
    pub data: T,
    /// Incremented on every write. Writers do not compare versions, so the
    /// last write wins.
    pub version: u64,
    /// When the session was first written.
    pub created_at: DateTime<Utc>,
    /// When the session was last written.
    pub saved_at: DateTime<Utc>,
}

impl<T> SessionData<T> {
    /// Age of the data relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.saved_at)
    }

    /// Whether the data was written within `max_age` of `now`.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) <= max_age
    }
}

/// Typed session manager over a key-value store.
///
/// # Example
///
/// ```rust,ignore
/// use paint_cache::{MemoryStore, Session, SessionId};
///
/// let sessions = Session::<Vec<String>, _>::new(MemoryStore::new());
/// let id = SessionId::generate();
/// sessions.set(&id, &vec!["living room".to_string()])?;
/// let fresh = sessions.get_fresh(&id, chrono::Duration::days(7), chrono::Utc::now())?;
/// ```
#[derive(Debug)]
pub struct Session<T, S> {
    cache: Cache<S>,
    namespace: String,
    _phantom: PhantomData<T>,
}

impl<T, S> Session<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KvStore,
{
    /// Create a session manager using the `session` namespace.
    pub fn new(store: S) -> Self {
        Self::with_namespace(store, "session")
    }

    /// Create a session manager whose keys are prefixed with `namespace`.
    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            namespace: namespace.into(),
            _phantom: PhantomData,
        }
    }

    /// Get session data if it exists, regardless of age.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    /// Get the full envelope including version and timestamps.
    pub fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        self.cache.get::<SessionData<T>>(&self.session_key(id))
    }

    /// Get session data only if it was saved within `max_age` of `now`.
    ///
    /// A stale entry is deleted and reported as missing.
    pub fn get_fresh(
        &self,
        id: &SessionId,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<Option<T>, CacheError> {
        match self.get_versioned(id)? {
            Some(envelope) if envelope.is_fresh(max_age, now) => Ok(Some(envelope.data)),
            Some(envelope) => {
                tracing::info!(
                    session = %id,
                    age_hours = envelope.age(now).num_hours(),
                    "discarding stale session"
                );
                self.delete(id)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Write session data stamped with the current time.
    pub fn set(&self, id: &SessionId, data: &T) -> Result<u64, CacheError> {
        self.set_at(id, data, Utc::now())
    }

    /// Write session data stamped with `now`. Returns the new version.
    pub fn set_at(&self, id: &SessionId, data: &T, now: DateTime<Utc>) -> Result<u64, CacheError> {
        let previous = self.get_versioned(id).ok().flatten();
        let (version, created_at) = match previous {
            Some(prev) => (prev.version + 1, prev.created_at),
            None => (1, now),
        };

        let envelope = SessionData {
            id: id.clone(),
            data: data.clone(),
            version,
            created_at,
            saved_at: now,
        };
        self.cache.set(&self.session_key(id), &envelope)?;
        Ok(version)
    }

    /// Delete a session.
    pub fn delete(&self, id: &SessionId) -> Result<(), CacheError> {
        self.cache.delete(&self.session_key(id))
    }

    /// Check if a session exists.
    pub fn exists(&self, id: &SessionId) -> Result<bool, CacheError> {
        self.cache.exists(&self.session_key(id))
    }

    fn session_key(&self, id: &SessionId) -> String {
        crate::cache_key!(self.namespace.as_str(), id)
    }
}
