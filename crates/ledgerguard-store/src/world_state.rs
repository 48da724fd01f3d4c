//! SQLite-backed world state
//!
//! Each `apply` runs in one SQLite transaction and appends a row to `blocks`,
//! so a commit either lands completely at its version or not at all.

use std::path::Path;

use ledgerguard_core::errors::Result as LedgerResult;
use ledgerguard_core::ledger::{
    CommitInfo, PrivateEntry, Version, Versioned, WorldState, WriteSet,
};
use rusqlite::{Connection, OptionalExtension, Transaction};

use crate::db;
use crate::errors::{corrupt_row, from_rusqlite, into_world_error, Result};
use crate::migrations::apply_migrations;

/// World state persisted in a SQLite database
pub struct SqliteWorldState {
    conn: Connection,
}

impl SqliteWorldState {
    /// Open (or create) the ledger database at `path` and bring its schema up
    /// to date
    ///
    /// # Errors
    ///
    /// IO, SQLite or migration failures.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    /// Ephemeral ledger, lost when dropped
    ///
    /// # Errors
    ///
    /// SQLite or migration failures.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Transaction id committed in `block_num`
    ///
    /// # Errors
    ///
    /// SQLite failures.
    pub fn block_tx_id(&self, block_num: u64) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT tx_id FROM blocks WHERE block_num = ?1",
                [to_sql_int(block_num)?],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)
    }

    fn load_public(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        self.conn
            .query_row(
                "SELECT value, block_num, tx_num FROM public_state WHERE key = ?1",
                [key],
                |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?)),
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(|(value, block_num, tx_num)| {
                Ok(Versioned::new(value, version("public_state", block_num, tx_num)?))
            })
            .transpose()
    }

    fn load_private(&self, collection: &str, key: &str) -> Result<Option<Versioned<PrivateEntry>>> {
        self.conn
            .query_row(
                "SELECT value, hash, block_num, tx_num FROM private_state
                 WHERE collection = ?1 AND key = ?2",
                [collection, key],
                |row| {
                    Ok((
                        row.get::<_, Vec<u8>>(0)?,
                        row.get::<_, Vec<u8>>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(|(value, hash, block_num, tx_num)| {
                Ok(Versioned::new(
                    PrivateEntry::new(value, hash),
                    version("private_state", block_num, tx_num)?,
                ))
            })
            .transpose()
    }

    fn load_private_hash(&self, collection: &str, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        self.conn
            .query_row(
                "SELECT hash, block_num, tx_num FROM private_state
                 WHERE collection = ?1 AND key = ?2",
                [collection, key],
                |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?)),
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(|(hash, block_num, tx_num)| {
                Ok(Versioned::new(hash, version("private_state", block_num, tx_num)?))
            })
            .transpose()
    }

    fn load_validation_parameter(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        self.conn
            .query_row(
                "SELECT policy, block_num, tx_num FROM validation_parameters WHERE key = ?1",
                [key],
                |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?)),
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(|(policy, block_num, tx_num)| {
                Ok(Versioned::new(
                    policy,
                    version("validation_parameters", block_num, tx_num)?,
                ))
            })
            .transpose()
    }

    fn load_height(&self) -> Result<u64> {
        let height: i64 = self
            .conn
            .query_row("SELECT COALESCE(MAX(block_num), 0) FROM blocks", [], |row| {
                row.get(0)
            })
            .map_err(from_rusqlite)?;
        u64::try_from(height).map_err(|e| corrupt_row("blocks", e))
    }

    fn write(&mut self, writes: &WriteSet, commit: &CommitInfo) -> Result<()> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        let v = commit.version();
        let block_num = to_sql_int(v.block_num)?;
        let tx_num = to_sql_int(v.tx_num)?;

        tx.execute(
            "INSERT INTO blocks (block_num, tx_id, committed_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                block_num,
                commit.tx_id.to_string(),
                chrono::Utc::now().timestamp()
            ],
        )
        .map_err(from_rusqlite)?;

        write_public(&tx, writes, block_num, tx_num)?;
        write_private(&tx, writes, block_num, tx_num)?;

        for (key, policy) in &writes.validation_parameters {
            tx.execute(
                "INSERT INTO validation_parameters (key, policy, block_num, tx_num)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(key) DO UPDATE SET
                    policy = excluded.policy,
                    block_num = excluded.block_num,
                    tx_num = excluded.tx_num",
                rusqlite::params![key, policy, block_num, tx_num],
            )
            .map_err(from_rusqlite)?;
        }

        tx.commit().map_err(from_rusqlite)?;
        tracing::debug!(
            block_num = commit.block_num,
            public = writes.public.len(),
            private = writes.private.len(),
            "applied block"
        );
        Ok(())
    }
}

fn write_public(tx: &Transaction<'_>, writes: &WriteSet, block_num: i64, tx_num: i64) -> Result<()> {
    for (key, value) in &writes.public {
        match value {
            Some(bytes) => {
                tx.execute(
                    "INSERT INTO public_state (key, value, block_num, tx_num)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        block_num = excluded.block_num,
                        tx_num = excluded.tx_num",
                    rusqlite::params![key, bytes, block_num, tx_num],
                )
                .map_err(from_rusqlite)?;
            }
            None => {
                tx.execute("DELETE FROM public_state WHERE key = ?1", [key])
                    .map_err(from_rusqlite)?;
                tx.execute("DELETE FROM validation_parameters WHERE key = ?1", [key])
                    .map_err(from_rusqlite)?;
            }
        }
    }
    Ok(())
}

fn write_private(tx: &Transaction<'_>, writes: &WriteSet, block_num: i64, tx_num: i64) -> Result<()> {
    for ((collection, key), entry) in &writes.private {
        match entry {
            Some(entry) => {
                tx.execute(
                    "INSERT INTO private_state (collection, key, value, hash, block_num, tx_num)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT(collection, key) DO UPDATE SET
                        value = excluded.value,
                        hash = excluded.hash,
                        block_num = excluded.block_num,
                        tx_num = excluded.tx_num",
                    rusqlite::params![
                        collection,
                        key,
                        entry.value.expose(),
                        entry.hash,
                        block_num,
                        tx_num
                    ],
                )
                .map_err(from_rusqlite)?;
            }
            None => {
                tx.execute(
                    "DELETE FROM private_state WHERE collection = ?1 AND key = ?2",
                    [collection, key],
                )
                .map_err(from_rusqlite)?;
            }
        }
    }
    Ok(())
}

fn to_sql_int(n: u64) -> Result<i64> {
    i64::try_from(n).map_err(|e| corrupt_row("blocks", e))
}

fn version(table: &str, block_num: i64, tx_num: i64) -> Result<Version> {
    let block_num = u64::try_from(block_num).map_err(|e| corrupt_row(table, e))?;
    let tx_num = u64::try_from(tx_num).map_err(|e| corrupt_row(table, e))?;
    Ok(Version::new(block_num, tx_num))
}

impl WorldState for SqliteWorldState {
    fn public(&self, key: &str) -> LedgerResult<Option<Versioned<Vec<u8>>>> {
        self.load_public(key).map_err(into_world_error)
    }

    fn private(&self, collection: &str, key: &str) -> LedgerResult<Option<Versioned<PrivateEntry>>> {
        self.load_private(collection, key).map_err(into_world_error)
    }

    // Avoids loading the plaintext just to read its hash
    fn private_hash(&self, collection: &str, key: &str) -> LedgerResult<Option<Versioned<Vec<u8>>>> {
        self.load_private_hash(collection, key)
            .map_err(into_world_error)
    }

    fn validation_parameter(&self, key: &str) -> LedgerResult<Option<Versioned<Vec<u8>>>> {
        self.load_validation_parameter(key)
            .map_err(into_world_error)
    }

    fn height(&self) -> LedgerResult<u64> {
        self.load_height().map_err(into_world_error)
    }

    fn apply(&mut self, writes: &WriteSet, commit: &CommitInfo) -> LedgerResult<()> {
        self.write(writes, commit).map_err(into_world_error)
    }
}
