//! SQLite persistence layer for the Ready Set Insure portal.
//!
//! This crate provides async database operations for insurance clients,
//! employee accounts, per-client chat logs, and outbound call records
//! using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::NewClient, client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:readyset.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Register a client
//!     let new_client = NewClient {
//!         policy_number: "12345678".to_string(),
//!         name: "Jane Doe".to_string(),
//!         dob: "1990-01-01".to_string(),
//!         email: "janedoe@example.com".to_string(),
//!         phone: "+15551234567".to_string(),
//!         sex: None,
//!         password_hash: "$2b$12$...".to_string(),
//!     };
//!     client::create_client(db.pool(), &new_client).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod call_record;
pub mod chatlog;
pub mod client;
pub mod employee;
pub mod error;
pub mod models;

pub use error::{DatabaseError, Result};
pub use models::{CallRecord, ChatMessage, Client, ClientStatus, Employee, NewClient, Sender};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/readyset.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn test_client(policy_number: &str) -> NewClient {
        NewClient {
            policy_number: policy_number.to_string(),
            name: format!("Client {}", policy_number),
            dob: "1990-01-01".to_string(),
            email: format!("{}@example.com", policy_number),
            phone: "+15551234567".to_string(),
            sex: None,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_client_crud() {
        let db = test_db().await;

        // Create
        client::create_client(db.pool(), &test_client("12345678"))
            .await
            .unwrap();

        // Read
        let fetched = client::get_client(db.pool(), "12345678").await.unwrap();
        assert_eq!(fetched.name, "Client 12345678");
        assert_eq!(fetched.status, ClientStatus::Active);
        assert!(fetched.summary.is_none());

        // Update status
        client::update_status(db.pool(), "12345678", ClientStatus::Incomplete)
            .await
            .unwrap();
        let fetched = client::get_client(db.pool(), "12345678").await.unwrap();
        assert_eq!(fetched.status, ClientStatus::Incomplete);

        // Update summary
        client::update_summary(db.pool(), "12345678", "spoke about a claim")
            .await
            .unwrap();
        let fetched = client::get_client(db.pool(), "12345678").await.unwrap();
        assert_eq!(fetched.summary.as_deref(), Some("spoke about a claim"));

        // List
        let clients = client::list_clients(db.pool()).await.unwrap();
        assert_eq!(clients.len(), 1);

        // Missing
        let result = client::get_client(db.pool(), "99999999").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_policy_number_rejected() {
        let db = test_db().await;

        client::create_client(db.pool(), &test_client("12345678"))
            .await
            .unwrap();

        let mut duplicate = test_client("12345678");
        duplicate.name = "Someone Else".to_string();
        duplicate.email = "else@example.com".to_string();

        let result = client::create_client(db.pool(), &duplicate).await;
        assert!(matches!(
            result,
            Err(DatabaseError::AlreadyExists { entity: "Client", .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_identity_rejected() {
        let db = test_db().await;

        client::create_client(db.pool(), &test_client("12345678"))
            .await
            .unwrap();

        // Same (name, email, dob) under a new policy number
        let mut duplicate = test_client("12345678");
        duplicate.policy_number = "87654321".to_string();

        let result = client::create_client(db.pool(), &duplicate).await;
        assert!(matches!(result, Err(DatabaseError::DuplicateIdentity { .. })));
    }

    #[tokio::test]
    async fn test_incomplete_listing() {
        let db = test_db().await;

        client::create_client(db.pool(), &test_client("11111111"))
            .await
            .unwrap();
        client::create_client(db.pool(), &test_client("22222222"))
            .await
            .unwrap();
        client::update_status(db.pool(), "22222222", ClientStatus::Incomplete)
            .await
            .unwrap();

        let incomplete =
            client::list_clients_by_status(db.pool(), ClientStatus::Incomplete)
                .await
                .unwrap();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].policy_number, "22222222");
    }

    #[tokio::test]
    async fn test_chatlog_ids_are_sequential() {
        let db = test_db().await;

        client::create_client(db.pool(), &test_client("12345678"))
            .await
            .unwrap();

        let first = chatlog::append_message(
            db.pool(),
            "12345678",
            "Hello, how can I help?",
            Sender::Assistant,
            "2026-08-01T10:00:00+00:00",
        )
        .await
        .unwrap();
        assert_eq!(first.id, 1);

        let second = chatlog::append_message(
            db.pool(),
            "12345678",
            "I have a question about my policy.",
            Sender::Client,
            "2026-08-01T10:00:30+00:00",
        )
        .await
        .unwrap();
        assert_eq!(second.id, 2);

        let log = chatlog::get_chatlog(db.pool(), "12345678").await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].sender, Sender::Assistant);
        assert_eq!(log[1].sender, Sender::Client);
        assert_eq!(log[1].message, "I have a question about my policy.");
    }

    #[tokio::test]
    async fn test_chatlog_requires_existing_client() {
        let db = test_db().await;

        let result = chatlog::append_message(
            db.pool(),
            "99999999",
            "hello",
            Sender::Client,
            "2026-08-01T10:00:00+00:00",
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_employee_signup_and_lookup() {
        let db = test_db().await;

        employee::create_employee(db.pool(), "johndoe@example.com", "hash-1")
            .await
            .unwrap();

        let fetched = employee::get_employee(db.pool(), "johndoe@example.com")
            .await
            .unwrap();
        assert_eq!(fetched.password_hash, "hash-1");

        let result = employee::create_employee(db.pool(), "johndoe@example.com", "hash-2").await;
        assert!(matches!(
            result,
            Err(DatabaseError::AlreadyExists { entity: "Employee", .. })
        ));
    }

    #[tokio::test]
    async fn test_call_records_ordered_by_recency() {
        let db = test_db().await;

        client::create_client(db.pool(), &test_client("12345678"))
            .await
            .unwrap();

        for (call_id, call_time) in [
            ("call-a", "2026-08-01T10:00:00+00:00"),
            ("call-b", "2026-08-02T10:00:00+00:00"),
            ("call-c", "2026-08-01T18:30:00+00:00"),
        ] {
            call_record::record_call(
                db.pool(),
                &CallRecord {
                    call_id: call_id.to_string(),
                    policy_number: "12345678".to_string(),
                    call_time: call_time.to_string(),
                    status: "initiated".to_string(),
                    last_checked: None,
                    notes: None,
                },
            )
            .await
            .unwrap();
        }

        let calls = call_record::list_calls(db.pool(), "12345678").await.unwrap();
        let ids: Vec<&str> = calls.iter().map(|c| c.call_id.as_str()).collect();
        assert_eq!(ids, vec!["call-b", "call-c", "call-a"]);

        let recent = call_record::recent_calls(db.pool(), "12345678", 2)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].call_id, "call-b");

        let latest = call_record::latest_call(db.pool(), "12345678")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.call_id, "call-b");
    }

    #[tokio::test]
    async fn test_call_record_requires_existing_client() {
        let db = test_db().await;

        let result = call_record::record_call(
            db.pool(),
            &CallRecord {
                call_id: "call-x".to_string(),
                policy_number: "99999999".to_string(),
                call_time: "2026-08-01T10:00:00+00:00".to_string(),
                status: "initiated".to_string(),
                last_checked: None,
                notes: None,
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(DatabaseError::NotFound { entity: "Client", .. })
        ));
    }

    #[tokio::test]
    async fn test_call_status_update() {
        let db = test_db().await;

        client::create_client(db.pool(), &test_client("12345678"))
            .await
            .unwrap();
        call_record::record_call(
            db.pool(),
            &CallRecord {
                call_id: "call-a".to_string(),
                policy_number: "12345678".to_string(),
                call_time: "2026-08-01T10:00:00+00:00".to_string(),
                status: "initiated".to_string(),
                last_checked: None,
                notes: None,
            },
        )
        .await
        .unwrap();

        call_record::update_call_status(
            db.pool(),
            "call-a",
            "in-progress",
            "2026-08-01T10:00:10+00:00",
        )
        .await
        .unwrap();

        let latest = call_record::latest_call(db.pool(), "12345678")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.status, "in-progress");
        assert_eq!(
            latest.last_checked.as_deref(),
            Some("2026-08-01T10:00:10+00:00")
        );

        let result = call_record::update_call_status(
            db.pool(),
            "no-such-call",
            "ended",
            "2026-08-01T10:00:20+00:00",
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
