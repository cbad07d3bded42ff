#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::review::{Rating, Review, ReviewDraft};
    use chrono::{NaiveDate, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::types::Type;
    use rusqlite::{Connection, Error, OptionalExtension, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[cfg(test)]
    mod tests {
        use super::*;

        // Helper function to create test database
        async fn create_test_db() -> Database {
            log!("[TEST] Creating in-memory test database");
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            db
        }

        fn draft(nickname: &str, rating: i64, text: &str) -> ReviewDraft {
            ReviewDraft {
                nickname: nickname.into(),
                rating: Rating::new(rating).unwrap(),
                text: text.into(),
            }
        }

        #[tokio::test]
        async fn test_schema_creation() {
            let db = create_test_db().await;

            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

            assert!(tables.contains(&"reviews".to_string()));
        }

        #[tokio::test]
        async fn test_insert_defaults_to_visible() {
            let db = create_test_db().await;
            let review = db.insert_review(&draft("Ivan", 4, "Good")).await.unwrap();

            assert!(review.is_visible);
            assert_eq!(review.date, Utc::now().date_naive());

            let all = db.get_all_reviews().await.unwrap();
            assert_eq!(all, vec![review.clone()]);
            let visible = db.get_visible_reviews().await.unwrap();
            assert_eq!(visible, vec![review]);
        }

        #[tokio::test]
        async fn test_newest_first() {
            let db = create_test_db().await;
            let first = db.insert_review(&draft("a", 5, "one")).await.unwrap();
            let second = db.insert_review(&draft("b", 3, "two")).await.unwrap();

            let ids: Vec<String> = db
                .get_all_reviews()
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect();
            assert_eq!(ids, vec![second.id, first.id]);
        }

        #[tokio::test]
        async fn test_toggle_is_an_involution() {
            let db = create_test_db().await;
            let review = db.insert_review(&draft("a", 5, "one")).await.unwrap();

            assert_eq!(db.toggle_visibility(&review.id).await.unwrap(), Some(false));
            assert!(db.get_visible_reviews().await.unwrap().is_empty());
            assert_eq!(db.get_all_reviews().await.unwrap().len(), 1);

            assert_eq!(db.toggle_visibility(&review.id).await.unwrap(), Some(true));
            assert_eq!(db.get_visible_reviews().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_toggle_unknown_id() {
            let db = create_test_db().await;
            assert_eq!(db.toggle_visibility("42").await.unwrap(), None);
            assert_eq!(db.toggle_visibility("not-a-number").await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_delete_twice_leaves_the_rest() {
            let db = create_test_db().await;
            let keep = db.insert_review(&draft("a", 5, "one")).await.unwrap();
            let gone = db.insert_review(&draft("b", 2, "two")).await.unwrap();

            assert!(db.delete_review(&gone.id).await.unwrap());
            assert!(!db.delete_review(&gone.id).await.unwrap());

            let all = db.get_all_reviews().await.unwrap();
            assert_eq!(all, vec![keep]);
        }
    }

    // Define a struct to represent a database connection
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    nickname TEXT NOT NULL,
                    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                    text TEXT NOT NULL,
                    is_visible INTEGER NOT NULL DEFAULT 1,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );
                CREATE INDEX IF NOT EXISTS reviews_created_at ON reviews (created_at);",
            )
            .map_err(|e| {
                logging::error!("[DB] Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        // Reviews shown on the public page, newest first
        pub async fn get_visible_reviews(&self) -> Result<Vec<Review>, Error> {
            self.query_reviews(
                "SELECT id, nickname, rating, text, date(created_at), is_visible
                 FROM reviews WHERE is_visible = 1
                 ORDER BY created_at DESC, id DESC",
            )
            .await
        }

        // Every review regardless of visibility, newest first
        pub async fn get_all_reviews(&self) -> Result<Vec<Review>, Error> {
            self.query_reviews(
                "SELECT id, nickname, rating, text, date(created_at), is_visible
                 FROM reviews
                 ORDER BY created_at DESC, id DESC",
            )
            .await
        }

        async fn query_reviews(&self, sql: &str) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([], review_from_row)?;
            rows.collect()
        }

        // Store a validated draft; the new review starts out visible
        pub async fn insert_review(&self, draft: &ReviewDraft) -> Result<Review, Error> {
            let now = Utc::now();
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews (nickname, rating, text, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    &draft.nickname,
                    draft.rating.get(),
                    &draft.text,
                    now.format("%Y-%m-%d %H:%M:%S").to_string(),
                ],
            )?;
            let id = conn.last_insert_rowid().to_string();
            log!("[DB] Review inserted: {}", id);
            Ok(draft.clone().into_review(id, now.date_naive()))
        }

        // Flip visibility; `None` when no review has this id
        pub async fn toggle_visibility(&self, review_id: &str) -> Result<Option<bool>, Error> {
            let conn = self.conn.lock().await;
            let visible = conn
                .query_row(
                    "UPDATE reviews SET is_visible = NOT is_visible WHERE id = ?1 RETURNING is_visible",
                    [review_id],
                    |row| row.get::<_, bool>(0),
                )
                .optional()?;
            log!("[DB] Visibility toggled for {}: {:?}", review_id, visible);
            Ok(visible)
        }

        // Hard delete; returns whether a row was removed
        pub async fn delete_review(&self, review_id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let removed = conn.execute("DELETE FROM reviews WHERE id = ?1", [review_id])?;
            log!("[DB] Review deleted: {} ({} rows)", review_id, removed);
            Ok(removed > 0)
        }
    }

    fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
        let rating: i64 = row.get(2)?;
        let rating = Rating::new(rating)
            .map_err(|e| Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e)))?;
        let date: String = row.get(4)?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(Review {
            id: row.get::<_, i64>(0)?.to_string(),
            nickname: row.get(1)?,
            rating,
            text: row.get(3)?,
            date,
            is_visible: row.get(5)?,
        })
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
