//! The user ledger: one row per registered user holding three category
//! labels and their running totals.

use std::fmt;
use std::sync::Arc;

use rusqlite::{params, ErrorCode, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::error::{AppError, AppResult};
use crate::storage::db::{get_connection, DbPool};

/// External identity of a chat user (Telegram user id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserIdentity(pub i64);

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a category and of the total that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    First,
    Second,
    Third,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::First, Slot::Second, Slot::Third];

    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
            Slot::Third => 2,
        }
    }

    /// 1-based position, as shown to users
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn next(self) -> Option<Slot> {
        match self {
            Slot::First => Some(Slot::Second),
            Slot::Second => Some(Slot::Third),
            Slot::Third => None,
        }
    }

    fn total_column(self) -> &'static str {
        match self {
            Slot::First => "expenses1",
            Slot::Second => "expenses2",
            Slot::Third => "expenses3",
        }
    }
}

/// A registered user's ledger
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Surrogate row id
    pub id: i64,
    pub identity: UserIdentity,
    pub display_name: String,
    pub categories: [String; 3],
    pub totals: [f64; 3],
}

impl UserRecord {
    pub fn category(&self, slot: Slot) -> &str {
        &self.categories[slot.index()]
    }

    pub fn total(&self, slot: Slot) -> f64 {
        self.totals[slot.index()]
    }

    /// Slots in order with their label and total
    pub fn entries(&self) -> impl Iterator<Item = (Slot, &str, f64)> + '_ {
        Slot::ALL
            .into_iter()
            .map(move |slot| (slot, self.category(slot), self.total(slot)))
    }
}

const SELECT_USER: &str = "SELECT id, telegram_id, name, category1, category2, category3, expenses1, expenses2, expenses3
     FROM users WHERE telegram_id = ?1";

/// Column type mismatches mean the row itself is broken, not the store
fn classify(identity: UserIdentity, err: rusqlite::Error) -> AppError {
    match err {
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            AppError::MalformedRecord(identity)
        }
        err => AppError::Database(err),
    }
}

fn parse_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        identity: UserIdentity(row.get(1)?),
        display_name: row.get(2)?,
        categories: [row.get(3)?, row.get(4)?, row.get(5)?],
        totals: [row.get(6)?, row.get(7)?, row.get(8)?],
    })
}

/// Durable mapping from user identity to `UserRecord`.
///
/// Every call takes its own pooled connection; uniqueness of the identity
/// is enforced by the table, not by callers checking first.
#[derive(Clone)]
pub struct UserStore {
    pool: Arc<DbPool>,
}

impl UserStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Looks up the ledger of a user.
    ///
    /// A row with missing fields surfaces as `AppError::MalformedRecord`.
    pub fn find_by_identity(&self, identity: UserIdentity) -> AppResult<Option<UserRecord>> {
        let conn = get_connection(&self.pool)?;
        let record = conn
            .query_row(SELECT_USER, params![identity.0], parse_row)
            .optional()
            .map_err(|e| classify(identity, e))?;
        Ok(record)
    }

    /// Creates the ledger of a user with all totals at zero.
    ///
    /// # Errors
    ///
    /// `AppError::DuplicateIdentity` if a ledger for `identity` already exists.
    pub fn create(
        &self,
        identity: UserIdentity,
        display_name: &str,
        categories: [String; 3],
    ) -> AppResult<UserRecord> {
        let conn = get_connection(&self.pool)?;
        let inserted = conn.execute(
            "INSERT INTO users (telegram_id, name, category1, category2, category3, expenses1, expenses2, expenses3)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, 0)",
            params![identity.0, display_name, categories[0], categories[1], categories[2]],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
                return Err(AppError::DuplicateIdentity(identity));
            }
            Err(e) => return Err(e.into()),
        }

        let record = UserRecord {
            id: conn.last_insert_rowid(),
            identity,
            display_name: display_name.to_string(),
            categories,
            totals: [0.0; 3],
        };
        log::info!("Created ledger {} for user {}", record.id, identity);
        Ok(record)
    }

    /// Adds `delta` to one total and returns the stored result.
    ///
    /// The read-modify-write is a single statement, so concurrent increments
    /// never lose an update.
    ///
    /// # Errors
    ///
    /// `AppError::NotFound` if no ledger exists for `identity`.
    pub fn increment_total(&self, identity: UserIdentity, slot: Slot, delta: f64) -> AppResult<f64> {
        let conn = get_connection(&self.pool)?;
        let sql = format!(
            "UPDATE users SET {col} = {col} + ?1 WHERE telegram_id = ?2 RETURNING {col}",
            col = slot.total_column()
        );

        let total: Option<f64> = conn
            .query_row(&sql, params![delta, identity.0], |row| row.get(0))
            .optional()
            .map_err(|e| classify(identity, e))?;
        total.ok_or(AppError::NotFound(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db::create_pool;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn make_store() -> (TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        (dir, UserStore::new(Arc::new(pool)))
    }

    fn labels(a: &str, b: &str, c: &str) -> [String; 3] {
        [a.to_string(), b.to_string(), c.to_string()]
    }

    // ── find_by_identity ─────────────────────────────────────────────────────

    #[test]
    fn find_unknown_user_returns_none() {
        let (_dir, store) = make_store();
        assert!(store.find_by_identity(UserIdentity(404)).unwrap().is_none());
    }

    #[test]
    fn find_returns_created_record() {
        let (_dir, store) = make_store();
        let created = store
            .create(UserIdentity(10), "Ann Lee", labels("Food", "Transport", "Fun"))
            .unwrap();

        let found = store.find_by_identity(UserIdentity(10)).unwrap().expect("must exist");
        assert_eq!(found, created);
        assert_eq!(found.totals, [0.0, 0.0, 0.0]);
        assert_eq!(found.category(Slot::Second), "Transport");
    }

    #[test]
    fn find_fails_on_malformed_row() {
        let (_dir, store) = make_store();
        get_connection(&store.pool)
            .unwrap()
            .execute("INSERT INTO users (telegram_id, name) VALUES (3, 'broken')", [])
            .unwrap();

        let err = store.find_by_identity(UserIdentity(3)).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord(UserIdentity(3))), "unexpected error: {err:?}");
        assert!(!err.is_store_unavailable());
    }

    // ── create ───────────────────────────────────────────────────────────────

    #[test]
    fn create_accepts_empty_and_duplicate_labels() {
        let (_dir, store) = make_store();
        let record = store.create(UserIdentity(1), "", labels("", "x", "x")).unwrap();
        assert_eq!(record.categories, labels("", "x", "x"));
    }

    #[test]
    fn create_twice_is_rejected_and_keeps_first_record() {
        let (_dir, store) = make_store();
        store.create(UserIdentity(7), "Ann", labels("a", "b", "c")).unwrap();
        store.increment_total(UserIdentity(7), Slot::First, 12.5).unwrap();

        let err = store.create(UserIdentity(7), "Ann", labels("x", "y", "z")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity(UserIdentity(7))));

        let record = store.find_by_identity(UserIdentity(7)).unwrap().unwrap();
        assert_eq!(record.categories, labels("a", "b", "c"));
        assert_eq!(record.totals, [12.5, 0.0, 0.0]);
    }

    #[test]
    fn concurrent_creates_yield_one_record() {
        let (_dir, store) = make_store();

        let handles: Vec<_> = (0..2)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || store.create(UserIdentity(99), "Racer", labels(&n.to_string(), "b", "c")))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let created = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(AppError::DuplicateIdentity(_))))
            .count();
        assert_eq!((created, duplicates), (1, 1));

        let count: i64 = get_connection(&store.pool)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM users WHERE telegram_id = 99", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    // ── increment_total ──────────────────────────────────────────────────────

    #[test]
    fn increment_touches_only_its_slot() {
        let (_dir, store) = make_store();
        store.create(UserIdentity(5), "Bo", labels("a", "b", "c")).unwrap();

        assert_eq!(store.increment_total(UserIdentity(5), Slot::Second, 40.0).unwrap(), 40.0);
        assert_eq!(store.increment_total(UserIdentity(5), Slot::Second, 2.5).unwrap(), 42.5);

        let record = store.find_by_identity(UserIdentity(5)).unwrap().unwrap();
        assert_eq!(record.totals, [0.0, 42.5, 0.0]);
    }

    #[test]
    fn increment_accepts_negative_delta() {
        let (_dir, store) = make_store();
        store.create(UserIdentity(5), "Bo", labels("a", "b", "c")).unwrap();

        assert_eq!(store.increment_total(UserIdentity(5), Slot::Third, -5.0).unwrap(), -5.0);
    }

    #[test]
    fn increment_unknown_user_is_not_found() {
        let (_dir, store) = make_store();
        let err = store.increment_total(UserIdentity(8), Slot::First, 1.0).unwrap_err();
        assert!(matches!(err, AppError::NotFound(UserIdentity(8))));
    }

    #[test]
    fn slot_order_and_numbering() {
        assert_eq!(Slot::First.next(), Some(Slot::Second));
        assert_eq!(Slot::Third.next(), None);
        assert_eq!(Slot::Third.number(), 3);
        assert_eq!(Slot::Second.to_string(), "second");
    }
}
