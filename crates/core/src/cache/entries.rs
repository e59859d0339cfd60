//! Named cache and entry operations.
//!
//! Each generation owns one named cache; entries are keyed by the hash of
//! request method and URL and deleted together with their cache.

use super::connection::CacheDb;
use super::hash::compute_cache_key;
use crate::network::{Request, Response};
use crate::Error;
use chrono::Utc;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

fn decode_headers(headers_json: &str) -> Result<Vec<(String, String)>, Error> {
    serde_json::from_str(headers_json).map_err(|e| Error::InvalidInput(format!("corrupt stored headers: {e}")))
}

impl CacheDb {
    /// Open a named cache, creating it if absent.
    pub async fn open_cache(&self, name: &str) -> Result<(), Error> {
        let name = name.to_string();
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO caches (name, created_at) VALUES (?1, ?2)",
                    params![name, now],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// List every cache name in creation order.
    pub async fn cache_names(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM caches ORDER BY rowid")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a named cache and all of its entries.
    ///
    /// Returns false if no cache had that name.
    pub async fn delete_cache(&self, name: &str) -> Result<bool, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM caches WHERE name = ?1", params![name])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Store a batch of responses in a named cache, all or nothing.
    ///
    /// The cache is created if absent. Existing entries for the same request
    /// are replaced. Only `GET` requests can be stored; any other method
    /// rejects the whole batch before anything is written.
    pub async fn put_entries(&self, cache_name: &str, entries: Vec<(Request, Response)>) -> Result<(), Error> {
        if let Some((req, _)) = entries.iter().find(|(req, _)| !req.method.eq_ignore_ascii_case("GET")) {
            return Err(Error::InvalidInput(format!(
                "only GET requests can be cached, got {} {}",
                req.method, req.url
            )));
        }

        let mut rows = Vec::with_capacity(entries.len());
        for (req, resp) in entries {
            let url = req.cache_url();
            let headers_json = serde_json::to_string(&resp.headers)
                .map_err(|e| Error::InvalidInput(format!("failed to encode headers: {e}")))?;
            rows.push((compute_cache_key(&req.method, &url), url, resp, headers_json));
        }

        let cache_name = cache_name.to_string();
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT OR IGNORE INTO caches (name, created_at) VALUES (?1, ?2)",
                    params![cache_name, now],
                )?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO cache_entries (
                            cache_name, key_hash, method, url, response_url,
                            status_code, headers_json, body, stored_at
                        ) VALUES (?1, ?2, 'GET', ?3, ?4, ?5, ?6, ?7, ?8)
                        ON CONFLICT(cache_name, key_hash) DO UPDATE SET
                            response_url = excluded.response_url,
                            status_code = excluded.status_code,
                            headers_json = excluded.headers_json,
                            body = excluded.body,
                            stored_at = excluded.stored_at",
                    )?;
                    for (key_hash, url, resp, headers_json) in &rows {
                        stmt.execute(params![
                            cache_name,
                            key_hash,
                            url,
                            resp.url,
                            resp.status,
                            headers_json,
                            resp.body,
                            now,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Store a single response.
    pub async fn put_entry(&self, cache_name: &str, request: &Request, response: &Response) -> Result<(), Error> {
        self.put_entries(cache_name, vec![(request.clone(), response.clone())])
            .await
    }

    /// Find the stored response for a request in a named cache.
    ///
    /// Matching uses method and URL only. Non-`GET` requests never match,
    /// and a missing cache behaves like an empty one.
    pub async fn match_request(&self, cache_name: &str, request: &Request) -> Result<Option<Response>, Error> {
        if !request.method.eq_ignore_ascii_case("GET") {
            return Ok(None);
        }

        let key_hash = compute_cache_key(&request.method, &request.cache_url());
        let cache_name = cache_name.to_string();
        let row = self
            .conn
            .call(move |conn| -> Result<Option<(String, u16, String, Vec<u8>)>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT response_url, status_code, headers_json, body
                    FROM cache_entries WHERE cache_name = ?1 AND key_hash = ?2",
                )?;

                let result = stmt.query_row(params![cache_name, key_hash], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                });

                match result {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        row.map(|(url, status, headers_json, body)| {
            Ok(Response { url, status, headers: decode_headers(&headers_json)?, body })
        })
        .transpose()
    }

    /// Request URLs stored in a named cache, in insertion order.
    pub async fn cache_keys(&self, cache_name: &str) -> Result<Vec<String>, Error> {
        let name = cache_name.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT url FROM cache_entries WHERE cache_name = ?1 ORDER BY rowid")?;
                let urls = stmt
                    .query_map(params![name], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(urls)
            })
            .await
            .map_err(Error::from)
    }
}
