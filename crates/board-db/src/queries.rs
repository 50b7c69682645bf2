use board_types::models::{Message, MessagePatch};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

use crate::{Database, Result, StoreError};

impl Database {
    /// Insert a new message. The store assigns the id and sets both
    /// timestamps to the same instant.
    pub fn create_message(&self, body: &str, username: &str) -> Result<Message> {
        require_text("body", body)?;
        require_text("username", username)?;

        let now = Utc::now();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (body, username, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                rusqlite::params![body, username, now],
            )?;
            let id = conn.last_insert_rowid();
            debug!("Created message {} by {}", id, username);

            query_message(conn, id)?.ok_or(StoreError::NotFound(id))
        })
    }

    /// All messages in creation order.
    pub fn list_messages(&self) -> Result<Vec<Message>> {
        self.with_conn(query_messages)
    }

    pub fn get_message(&self, id: i64) -> Result<Message> {
        self.with_conn(|conn| query_message(conn, id)?.ok_or(StoreError::NotFound(id)))
    }

    /// Apply a patch and refresh `updated_at`. An empty patch leaves the
    /// message untouched.
    pub fn update_message(&self, id: i64, patch: &MessagePatch) -> Result<Message> {
        if let Some(body) = &patch.body {
            require_text("body", body)?;
        }

        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let current = query_message(&tx, id)?.ok_or(StoreError::NotFound(id))?;

            let Some(body) = &patch.body else {
                return Ok(current);
            };

            // Never step backwards if the wall clock does
            let updated_at = Utc::now().max(current.updated_at);
            tx.execute(
                "UPDATE messages SET body = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![body, updated_at, id],
            )?;
            let updated = query_message(&tx, id)?.ok_or(StoreError::NotFound(id))?;
            tx.commit()?;

            debug!("Updated message {}", id);
            Ok(updated)
        })
    }

    pub fn delete_message(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            if affected == 0 {
                return Err(StoreError::NotFound(id));
            }
            debug!("Deleted message {}", id);
            Ok(())
        })
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn query_message(conn: &Connection, id: i64) -> Result<Option<Message>> {
    let row = conn
        .query_row(
            "SELECT id, body, username, created_at, updated_at FROM messages WHERE id = ?1",
            [id],
            message_from_row,
        )
        .optional()?;

    Ok(row)
}

fn query_messages(conn: &Connection) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(
        "SELECT id, body, username, created_at, updated_at FROM messages ORDER BY id ASC",
    )?;

    let rows = stmt
        .query_map([], message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        body: row.get(1)?,
        username: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
