//! Per-client chat log persistence.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ChatMessage, Sender};

/// Append a message to a client's chat log.
///
/// The message id is the next value in the client's sequence (count of
/// existing messages plus one), assigned inside a transaction so concurrent
/// appends cannot produce duplicate ids.
pub async fn append_message(
    pool: &SqlitePool,
    policy_number: &str,
    message: &str,
    sender: Sender,
    timestamp: &str,
) -> Result<ChatMessage> {
    let mut tx = pool.begin().await?;

    let client_exists = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM clients
        WHERE policy_number = ?
        "#,
    )
    .bind(policy_number)
    .fetch_one(&mut *tx)
    .await?;

    if client_exists == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Client",
            id: policy_number.to_string(),
        });
    }

    let next_id = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) + 1 FROM chat_messages
        WHERE policy_number = ?
        "#,
    )
    .bind(policy_number)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO chat_messages (policy_number, id, message, sender, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(policy_number)
    .bind(next_id)
    .bind(message)
    .bind(sender)
    .bind(timestamp)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ChatMessage {
        id: next_id,
        message: message.to_string(),
        sender,
        timestamp: timestamp.to_string(),
    })
}

/// Get a client's chat log in message order.
pub async fn get_chatlog(pool: &SqlitePool, policy_number: &str) -> Result<Vec<ChatMessage>> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, message, sender, timestamp
        FROM chat_messages
        WHERE policy_number = ?
        ORDER BY id
        "#,
    )
    .bind(policy_number)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
