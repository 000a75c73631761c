//! Employee account CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Employee;

/// Create a new employee account.
pub async fn create_employee(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO employees (email, password_hash)
        VALUES (?, ?)
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Employee",
                    id: email.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get an employee by email.
pub async fn get_employee(pool: &SqlitePool, email: &str) -> Result<Employee> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT email, password_hash
        FROM employees
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Employee",
        id: email.to_string(),
    })
}
