//! Client record CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Client, ClientStatus, NewClient};

/// Create a new client record.
///
/// Fails with `AlreadyExists` if the policy number is taken, and with
/// `DuplicateIdentity` if a client with the same (name, email, dob) triple
/// is already registered under another policy number.
pub async fn create_client(pool: &SqlitePool, client: &NewClient) -> Result<()> {
    let existing_policy = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM clients
        WHERE policy_number = ?
        "#,
    )
    .bind(&client.policy_number)
    .fetch_one(pool)
    .await?;

    if existing_policy > 0 {
        return Err(DatabaseError::AlreadyExists {
            entity: "Client",
            id: client.policy_number.clone(),
        });
    }

    let existing_identity = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM clients
        WHERE name = ? AND email = ? AND dob = ?
        "#,
    )
    .bind(&client.name)
    .bind(&client.email)
    .bind(&client.dob)
    .fetch_one(pool)
    .await?;

    if existing_identity > 0 {
        return Err(DatabaseError::DuplicateIdentity {
            name: client.name.clone(),
            email: client.email.clone(),
        });
    }

    sqlx::query(
        r#"
        INSERT INTO clients (policy_number, name, dob, email, phone, sex, password_hash, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, 'active')
        "#,
    )
    .bind(&client.policy_number)
    .bind(&client.name)
    .bind(&client.dob)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(&client.sex)
    .bind(&client.password_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        // Backstop for concurrent signups that slip past the checks above.
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Client",
                    id: client.policy_number.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a client by policy number.
pub async fn get_client(pool: &SqlitePool, policy_number: &str) -> Result<Client> {
    sqlx::query_as::<_, Client>(
        r#"
        SELECT policy_number, name, dob, email, phone, sex, status,
               summary, last_feedback, last_feedback_date
        FROM clients
        WHERE policy_number = ?
        "#,
    )
    .bind(policy_number)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Client",
        id: policy_number.to_string(),
    })
}

/// List all clients.
pub async fn list_clients(pool: &SqlitePool) -> Result<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(
        r#"
        SELECT policy_number, name, dob, email, phone, sex, status,
               summary, last_feedback, last_feedback_date
        FROM clients
        ORDER BY policy_number
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

/// List clients with a given status.
pub async fn list_clients_by_status(
    pool: &SqlitePool,
    status: ClientStatus,
) -> Result<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(
        r#"
        SELECT policy_number, name, dob, email, phone, sex, status,
               summary, last_feedback, last_feedback_date
        FROM clients
        WHERE status = ?
        ORDER BY policy_number
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

/// Update a client's status.
pub async fn update_status(
    pool: &SqlitePool,
    policy_number: &str,
    status: ClientStatus,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE clients
        SET status = ?
        WHERE policy_number = ?
        "#,
    )
    .bind(status)
    .bind(policy_number)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Client",
            id: policy_number.to_string(),
        });
    }

    Ok(())
}

/// Update a client's rolling summary.
pub async fn update_summary(pool: &SqlitePool, policy_number: &str, summary: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE clients
        SET summary = ?
        WHERE policy_number = ?
        "#,
    )
    .bind(summary)
    .bind(policy_number)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Client",
            id: policy_number.to_string(),
        });
    }

    Ok(())
}

/// Store the latest feedback collected for a client.
pub async fn update_feedback(
    pool: &SqlitePool,
    policy_number: &str,
    feedback: &str,
    feedback_date: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE clients
        SET last_feedback = ?, last_feedback_date = ?
        WHERE policy_number = ?
        "#,
    )
    .bind(feedback)
    .bind(feedback_date)
    .bind(policy_number)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Client",
            id: policy_number.to_string(),
        });
    }

    Ok(())
}
