pub mod backend;
pub mod codec;
pub mod db;
pub mod error;
pub mod kv;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use vallink_core::{Clock, IdGenerator, SystemClock, UuidIdGenerator};

pub use backend::{KeyValueBackend, MemoryBackend};
pub use kv::SqliteKv;
pub use repo::ProposalsRepo;

pub struct Store {
    conn: Connection,
    quota: Option<usize>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            quota: None,
            ids: Box::new(UuidIdGenerator),
            clock: Box::new(SystemClock),
        }
    }

    /// Caps the total bytes of stored keys and values.
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn kv(&self) -> SqliteKv<'_> {
        SqliteKv::new(&self.conn, self.quota)
    }

    pub fn proposals(&self) -> ProposalsRepo<'_, SqliteKv<'_>> {
        ProposalsRepo::new(self.kv(), self.ids.as_ref(), self.clock.as_ref())
    }
}
