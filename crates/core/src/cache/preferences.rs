//! Small persisted key/value flags.
//!
//! Page-side workflows (the install prompt) keep their flags here instead of
//! in browser local storage.

use super::connection::CacheDb;
use crate::Error;
use chrono::Utc;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl CacheDb {
    /// Read a preference value.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT value FROM preferences WHERE key = ?1", params![key], |row| {
                    row.get(0)
                });

                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or overwrite a preference value.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<(), Error> {
        let key = key.to_string();
        let value = value.to_string();
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![key, value, now],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_preference() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get_preference("pwa_installed").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_and_overwrite_preference() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.set_preference("pwa_installed", "false").await.unwrap();
        db.set_preference("pwa_installed", "true").await.unwrap();

        assert_eq!(db.get_preference("pwa_installed").await.unwrap().as_deref(), Some("true"));
    }
}
