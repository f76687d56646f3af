use rusqlite::{params, Connection, OptionalExtension};

use super::{format_timestamp, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::User;

/// Insert a user. A taken username is reported as `ConstraintViolation`.
pub fn insert_user(conn: &Connection, u: &User) -> Result<(), DatabaseError> {
    let result = conn.execute(
        "INSERT INTO users (id, username, password, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            u.id.to_string(),
            u.username,
            u.password,
            u.role,
            format_timestamp(&u.created_at),
        ],
    );

    match result.map_err(DatabaseError::from) {
        Ok(_) => Ok(()),
        Err(e) if e.is_unique_violation() => Err(DatabaseError::ConstraintViolation(format!(
            "username '{}' already exists",
            u.username
        ))),
        Err(e) => Err(e),
    }
}

pub fn find_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = conn
        .query_row(
            "SELECT id, username, password, role, created_at FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(User {
                    id: uuid_column(row, 0)?,
                    username: row.get(1)?,
                    password: row.get(2)?,
                    role: row.get(3)?,
                    created_at: timestamp_column(row, 4)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}
