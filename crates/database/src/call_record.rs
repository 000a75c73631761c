//! Outbound call record persistence.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::CallRecord;

/// Record a newly placed call.
///
/// The policy number must reference an existing client; the foreign key
/// rejects records for unknown policies.
pub async fn record_call(pool: &SqlitePool, record: &CallRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO call_records (call_id, policy_number, call_time, status, last_checked, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.call_id)
    .bind(&record.policy_number)
    .bind(&record.call_time)
    .bind(&record.status)
    .bind(&record.last_checked)
    .bind(&record.notes)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "CallRecord",
                    id: record.call_id.clone(),
                };
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::NotFound {
                    entity: "Client",
                    id: record.policy_number.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a tracked call by its provider-assigned id.
pub async fn get_call(pool: &SqlitePool, call_id: &str) -> Result<CallRecord> {
    sqlx::query_as::<_, CallRecord>(
        r#"
        SELECT call_id, policy_number, call_time, status, last_checked, notes
        FROM call_records
        WHERE call_id = ?
        "#,
    )
    .bind(call_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "CallRecord",
        id: call_id.to_string(),
    })
}

/// Update the status of a tracked call after a poll.
pub async fn update_call_status(
    pool: &SqlitePool,
    call_id: &str,
    status: &str,
    last_checked: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE call_records
        SET status = ?, last_checked = ?
        WHERE call_id = ?
        "#,
    )
    .bind(status)
    .bind(last_checked)
    .bind(call_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "CallRecord",
            id: call_id.to_string(),
        });
    }

    Ok(())
}

/// All calls placed for a policy, most recent first.
pub async fn list_calls(pool: &SqlitePool, policy_number: &str) -> Result<Vec<CallRecord>> {
    let records = sqlx::query_as::<_, CallRecord>(
        r#"
        SELECT call_id, policy_number, call_time, status, last_checked, notes
        FROM call_records
        WHERE policy_number = ?
        ORDER BY call_time DESC
        "#,
    )
    .bind(policy_number)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// The most recent calls placed for a policy.
pub async fn recent_calls(
    pool: &SqlitePool,
    policy_number: &str,
    limit: i64,
) -> Result<Vec<CallRecord>> {
    let records = sqlx::query_as::<_, CallRecord>(
        r#"
        SELECT call_id, policy_number, call_time, status, last_checked, notes
        FROM call_records
        WHERE policy_number = ?
        ORDER BY call_time DESC
        LIMIT ?
        "#,
    )
    .bind(policy_number)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// The latest call placed for a policy, if any.
pub async fn latest_call(pool: &SqlitePool, policy_number: &str) -> Result<Option<CallRecord>> {
    let record = sqlx::query_as::<_, CallRecord>(
        r#"
        SELECT call_id, policy_number, call_time, status, last_checked, notes
        FROM call_records
        WHERE policy_number = ?
        ORDER BY call_time DESC
        LIMIT 1
        "#,
    )
    .bind(policy_number)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}
