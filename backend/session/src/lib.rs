pub mod sqlite_store;
pub mod store;
pub mod types;

pub use sqlite_store::SqliteSessionStore;
pub use store::{InMemorySessionStore, SessionStore};
pub use types::{NewSession, Session};
