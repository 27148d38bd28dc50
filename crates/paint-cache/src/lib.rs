//! Key-value persistence for quote carts and sessions.
//!
//! Provides a small byte-level [`KvStore`] trait with in-memory and
//! directory-backed implementations, a typed JSON [`Cache`] on top, and a
//! versioned [`Session`] envelope with a freshness window.
//!
//! # Example
//!
//! ```rust,ignore
//! use paint_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart:sess_abc", &snapshot)?;
//! let snapshot: Option<CartSnapshot> = cache.get("cart:sess_abc")?;
//! cache.delete("cart:sess_abc")?;
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{Cache, DirStore, KvStore, MemoryStore};
pub use session::{Session, SessionData, SessionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, DirStore, KvStore, MemoryStore, Session, SessionId};
}
