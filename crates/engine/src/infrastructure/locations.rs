//! SQLite-backed location storage.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use locatr_domain::{ImageUrl, Location, LocationCode, LocationId, LocationName};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::infrastructure::ports::{
    ClockPort, LocationChanges, LocationFilter, LocationRepo, NewLocation, Page, PageRequest,
    RepoError,
};

const COLUMNS: &str = "id, code, name, image, created_at, updated_at";

/// SQLite implementation of the location store.
///
/// The UNIQUE constraint on `code` is the source of truth for uniqueness;
/// violations surface as `RepoError::DuplicateCode`.
///
/// `code_folded` / `name_folded` hold the lower-cased text that filters match
/// against, since SQLite's `LIKE` only folds ASCII.
pub struct SqliteLocationRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteLocationRepo {
    /// Connect to `database_url` (e.g. `sqlite:locations.db?mode=rwc`) and
    /// make sure the schema exists.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        Self::with_pool(pool, clock).await
    }

    /// A private in-memory database. One connection that never expires, since
    /// the data lives and dies with it.
    pub async fn in_memory(clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        Self::with_pool(pool, clock).await
    }

    async fn with_pool(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS locations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                code_folded TEXT NOT NULL,
                name_folded TEXT NOT NULL,
                image TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("schema", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_locations_created_at ON locations (created_at)")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;

        Ok(Self { pool, clock })
    }

    /// Current time in the fixed-width form stored in the table, which keeps
    /// text ordering equal to time ordering.
    fn timestamp(&self) -> String {
        encode_timestamp(self.clock.now())
    }
}

#[async_trait]
impl LocationRepo for SqliteLocationRepo {
    async fn list_all(&self) -> Result<Vec<Location>, RepoError> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {COLUMNS} FROM locations ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_all", e))?;

        rows.into_iter().map(Location::try_from).collect()
    }

    async fn list_page(
        &self,
        filter: &LocationFilter,
        page: PageRequest,
    ) -> Result<Page<Location>, RepoError> {
        let (where_sql, binds) = filter_clause(filter);

        // `total` and `items` come from the same snapshot.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("list_page", e))?;

        let count_sql = format!("SELECT COUNT(*) FROM locations{where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in &binds {
            count_query = count_query.bind(value.clone());
        }
        let total = count_query
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::database("list_page", e))?;

        let select_sql = format!(
            "SELECT {COLUMNS} FROM locations{where_sql} \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );
        let mut select_query = sqlx::query_as::<_, LocationRow>(&select_sql);
        for value in &binds {
            select_query = select_query.bind(value.clone());
        }
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows = select_query
            .bind(i64::from(page.per_page()))
            .bind(offset)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| RepoError::database("list_page", e))?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("list_page", e))?;

        let items = rows
            .into_iter()
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or_default(),
            request: page,
        })
    }

    async fn get(&self, id: LocationId) -> Result<Option<Location>, RepoError> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {COLUMNS} FROM locations WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get", e))?;

        row.map(Location::try_from).transpose()
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count", e))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn is_code_unique(
        &self,
        code: &LocationCode,
        exclude: Option<LocationId>,
    ) -> Result<bool, RepoError> {
        let exclude = exclude.map(|id| id.as_i64());
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM locations WHERE code = ? AND (? IS NULL OR id != ?))",
        )
        .bind(code.as_str())
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("is_code_unique", e))?;

        Ok(taken == 0)
    }

    async fn create(&self, location: &NewLocation) -> Result<Location, RepoError> {
        let now = self.timestamp();

        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "INSERT INTO locations (code, name, code_folded, name_folded, image, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(location.code.as_str())
        .bind(location.name.as_str())
        .bind(fold(location.code.as_str()))
        .bind(fold(location.name.as_str()))
        .bind(location.image.as_ref().map(|url| url.to_string()))
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("create", Some(&location.code), e))?;

        tracing::debug!(id = row.id, code = %location.code, "Stored location");
        Location::try_from(row)
    }

    async fn update(
        &self,
        id: LocationId,
        changes: &LocationChanges,
    ) -> Result<Location, RepoError> {
        let mut assignments = vec!["updated_at = ?"];
        let mut binds: Vec<Option<String>> = vec![Some(self.timestamp())];

        if let Some(code) = &changes.code {
            assignments.extend(["code = ?", "code_folded = ?"]);
            binds.extend([Some(code.to_string()), Some(fold(code.as_str()))]);
        }
        if let Some(name) = &changes.name {
            assignments.extend(["name = ?", "name_folded = ?"]);
            binds.extend([Some(name.to_string()), Some(fold(name.as_str()))]);
        }
        if let Some(image) = &changes.image {
            assignments.push("image = ?");
            binds.push(image.as_ref().map(|url| url.to_string()));
        }

        let sql = format!(
            "UPDATE locations SET {} WHERE id = ? RETURNING {COLUMNS}",
            assignments.join(", ")
        );
        let mut query = sqlx::query_as::<_, LocationRow>(&sql);
        for value in binds {
            query = query.bind(value);
        }

        let row = query
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("update", changes.code.as_ref(), e))?
            .ok_or_else(|| RepoError::not_found("Location", id))?;

        Location::try_from(row)
    }

    async fn delete(&self, id: LocationId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Location", id));
        }

        tracing::debug!(id = %id, "Deleted location");
        Ok(())
    }
}

// =============================================================================
// Row mapping
// =============================================================================

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: i64,
    code: String,
    name: String,
    image: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<LocationRow> for Location {
    type Error = RepoError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        let code = LocationCode::new(row.code).map_err(RepoError::serialization)?;
        let name = LocationName::new(row.name).map_err(RepoError::serialization)?;
        let image = row
            .image
            .map(ImageUrl::new)
            .transpose()
            .map_err(RepoError::serialization)?;

        Ok(Location::from_parts(
            LocationId::from_i64(row.id),
            code,
            name,
            image,
            decode_timestamp(&row.created_at)?,
            decode_timestamp(&row.updated_at)?,
        ))
    }
}

fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("bad timestamp {raw:?}: {e}")))
}

// =============================================================================
// Query helpers
// =============================================================================

/// `WHERE` clause (with leading space, or empty) and its bind values.
fn filter_clause(filter: &LocationFilter) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut binds = Vec::new();

    if let Some(name) = filter.name() {
        clauses.push("name_folded LIKE ? ESCAPE '\\'");
        binds.push(like_pattern(&fold(name)));
    }
    if let Some(code) = filter.code() {
        clauses.push("code_folded LIKE ? ESCAPE '\\'");
        binds.push(like_pattern(&fold(code)));
    }

    if clauses.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), binds)
    }
}

/// Lower-cased form used for case-insensitive matching.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Substring pattern for SQLite `LIKE` with the wildcard characters of
/// `needle` matched literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn write_error(operation: &'static str, code: Option<&LocationCode>, err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepoError::DuplicateCode(code.map(ToString::to_string).unwrap_or_default());
        }
    }
    RepoError::database(operation, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SteppingClock;
    use chrono::TimeZone;

    async fn repo() -> SqliteLocationRepo {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        SqliteLocationRepo::in_memory(Arc::new(SteppingClock::starting_at(start)))
            .await
            .unwrap()
    }

    fn new_location(code: &str, name: &str) -> NewLocation {
        NewLocation {
            code: LocationCode::new(code).unwrap(),
            name: LocationName::new(name).unwrap(),
            image: None,
        }
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Test"), "%Test%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn filter_clause_combines_with_and() {
        let (sql, binds) =
            filter_clause(&LocationFilter::new(Some("tower".into()), Some("EIF".into())));
        assert_eq!(
            sql,
            " WHERE name_folded LIKE ? ESCAPE '\\' AND code_folded LIKE ? ESCAPE '\\'"
        );
        assert_eq!(binds, vec!["%tower%".to_string(), "%eif%".to_string()]);

        let (sql, binds) = filter_clause(&LocationFilter::default());
        assert!(sql.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn timestamps_round_trip_at_microsecond_precision() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 10, 11, 12).unwrap();
        let encoded = encode_timestamp(at);
        assert_eq!(encoded, "2024-03-09T10:11:12.000000Z");
        assert_eq!(decode_timestamp(&encoded).unwrap(), at);
    }

    #[tokio::test]
    async fn when_created_then_store_assigns_id_and_timestamps() {
        let repo = repo().await;

        let created = repo.create(&new_location("EIFFEL", "Torre Eiffel")).await.unwrap();
        assert!(created.id().as_i64() > 0);
        assert_eq!(created.created_at(), created.updated_at());
        assert!(created.image().is_none());

        let fetched = repo.get(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn when_code_taken_then_create_fails_and_store_is_unchanged() {
        let repo = repo().await;
        repo.create(&new_location("DUPLICATE", "First")).await.unwrap();

        let err = repo
            .create(&new_location("DUPLICATE", "Second"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::DuplicateCode(code) if code == "DUPLICATE"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn when_codes_differ_only_in_case_then_both_are_stored() {
        let repo = repo().await;
        repo.create(&new_location("abc", "Lower")).await.unwrap();
        repo.create(&new_location("ABC", "Upper")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn when_listing_then_newest_first() {
        let repo = repo().await;
        repo.create(&new_location("A", "First")).await.unwrap();
        repo.create(&new_location("B", "Second")).await.unwrap();
        repo.create(&new_location("C", "Third")).await.unwrap();

        let codes: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|l| l.code().to_string())
            .collect();
        assert_eq!(codes, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn when_paginating_25_by_10_then_pages_hold_10_10_5() {
        let repo = repo().await;
        for i in 0..25 {
            repo.create(&new_location(&format!("LOC{i:02}"), &format!("Location {i}")))
                .await
                .unwrap();
        }

        let first = repo
            .list_page(&LocationFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages(), 3);
        assert_eq!(first.items[0].code().as_str(), "LOC24");

        let last = repo
            .list_page(&LocationFilter::default(), PageRequest::new(3, 10))
            .await
            .unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[4].code().as_str(), "LOC00");

        let beyond = repo
            .list_page(&LocationFilter::default(), PageRequest::new(4, 10))
            .await
            .unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 25);
    }

    #[tokio::test]
    async fn when_filtering_then_substring_match_ignores_case() {
        let repo = repo().await;
        repo.create(&new_location("TEST001", "Test Location")).await.unwrap();
        repo.create(&new_location("PROD001", "Another Location")).await.unwrap();

        let by_name = repo
            .list_page(&LocationFilter::new(Some("test".into()), None), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.items[0].name().as_str(), "Test Location");

        let by_code = repo
            .list_page(&LocationFilter::new(None, Some("prod".into())), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_code.items[0].code().as_str(), "PROD001");

        let both = repo
            .list_page(
                &LocationFilter::new(Some("location".into()), Some("TEST".into())),
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(both.total, 1);
    }

    #[tokio::test]
    async fn when_filter_has_accented_capitals_then_match_ignores_case() {
        let repo = repo().await;
        repo.create(&new_location("ETOILE", "Étoile Plaza")).await.unwrap();
        repo.create(&new_location("OTHER", "Plaza Mayor")).await.unwrap();

        let by_name = repo
            .list_page(&LocationFilter::new(Some("étoile".into()), None), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.items[0].name().as_str(), "Étoile Plaza");

        let upper = repo
            .list_page(&LocationFilter::new(Some("ÉTOILE".into()), None), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(upper.total, 1);

        let by_code = repo
            .list_page(&LocationFilter::new(None, Some("etoile".into())), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(by_code.items[0].code().as_str(), "ETOILE");
    }

    #[tokio::test]
    async fn when_renamed_then_filter_matches_the_new_name() {
        let repo = repo().await;
        let created = repo.create(&new_location("GATE", "Old Gate")).await.unwrap();

        repo.update(
            created.id(),
            &LocationChanges {
                name: Some(LocationName::new("Ünter Tor").unwrap()),
                ..LocationChanges::default()
            },
        )
        .await
        .unwrap();

        let old = repo
            .list_page(&LocationFilter::new(Some("old".into()), None), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(old.total, 0);

        let new = repo
            .list_page(&LocationFilter::new(Some("ünter".into()), None), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(new.total, 1);
    }

    #[tokio::test]
    async fn when_filter_has_wildcards_then_they_match_literally() {
        let repo = repo().await;
        repo.create(&new_location("SALE", "50% off")).await.unwrap();
        repo.create(&new_location("FULL", "500 full")).await.unwrap();

        let page = repo
            .list_page(&LocationFilter::new(Some("0%".into()), None), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].code().as_str(), "SALE");
    }

    #[tokio::test]
    async fn when_updating_name_then_other_fields_stay_and_updated_at_moves() {
        let repo = repo().await;
        let created = repo
            .create(&NewLocation {
                image: Some(ImageUrl::new("https://example.com/petra.jpg").unwrap()),
                ..new_location("PETRA", "Petra")
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id(),
                &LocationChanges {
                    name: Some(LocationName::new("Petra, Jordan").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.code(), created.code());
        assert_eq!(updated.name().as_str(), "Petra, Jordan");
        assert_eq!(updated.image(), created.image());
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at() > created.updated_at());
    }

    #[tokio::test]
    async fn when_update_clears_image_then_image_is_null() {
        let repo = repo().await;
        let created = repo
            .create(&NewLocation {
                image: Some(ImageUrl::new("https://example.com/a.jpg").unwrap()),
                ..new_location("A", "A")
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id(),
                &LocationChanges {
                    image: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.image().is_none());
    }

    #[tokio::test]
    async fn when_update_takes_another_code_then_fails_and_record_is_unchanged() {
        let repo = repo().await;
        repo.create(&new_location("FIRST", "First")).await.unwrap();
        let second = repo.create(&new_location("SECOND", "Second")).await.unwrap();

        let err = repo
            .update(
                second.id(),
                &LocationChanges {
                    code: Some(LocationCode::new("FIRST").unwrap()),
                    name: Some(LocationName::new("Renamed").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::DuplicateCode(_)));

        let unchanged = repo.get(second.id()).await.unwrap().unwrap();
        assert_eq!(unchanged, second);
    }

    #[tokio::test]
    async fn when_updating_missing_row_then_not_found() {
        let repo = repo().await;
        let err = repo
            .update(LocationId::from_i64(999), &LocationChanges::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn when_deleted_then_get_is_none_and_second_delete_is_not_found() {
        let repo = repo().await;
        let created = repo.create(&new_location("GONE", "Gone")).await.unwrap();

        repo.delete(created.id()).await.unwrap();
        assert!(repo.get(created.id()).await.unwrap().is_none());
        assert!(repo.delete(created.id()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn when_row_deleted_then_its_id_is_not_reused() {
        let repo = repo().await;
        let first = repo.create(&new_location("ONE", "One")).await.unwrap();
        repo.delete(first.id()).await.unwrap();

        let second = repo.create(&new_location("TWO", "Two")).await.unwrap();
        assert!(second.id() > first.id());
    }

    #[tokio::test]
    async fn when_checking_uniqueness_then_excluded_id_is_ignored() {
        let repo = repo().await;
        let created = repo.create(&new_location("MACHU", "Machu Picchu")).await.unwrap();
        let code = LocationCode::new("MACHU").unwrap();

        assert!(!repo.is_code_unique(&code, None).await.unwrap());
        assert!(repo.is_code_unique(&code, Some(created.id())).await.unwrap());
        assert!(repo
            .is_code_unique(&LocationCode::new("OTHER").unwrap(), None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn when_file_store_reopened_then_rows_persist() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("locations.db").display());
        let clock: Arc<dyn ClockPort> = Arc::new(crate::infrastructure::clock::SystemClock::new());

        {
            let repo = SqliteLocationRepo::connect(&url, 2, clock.clone()).await.unwrap();
            repo.create(&new_location("KEEP", "Kept")).await.unwrap();
            repo.pool.close().await;
        }

        let reopened = SqliteLocationRepo::connect(&url, 2, clock).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn when_same_code_created_concurrently_then_exactly_one_wins() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("race.db").display());
        let clock: Arc<dyn ClockPort> = Arc::new(crate::infrastructure::clock::SystemClock::new());
        let repo = Arc::new(SqliteLocationRepo::connect(&url, 5, clock).await.unwrap());

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..10 {
            let repo = Arc::clone(&repo);
            tasks.spawn(async move { repo.create(&new_location("SAME", &format!("Copy {i}"))).await });
        }

        let (mut ok, mut duplicate, mut other) = (0, 0, 0);
        while let Some(result) = tasks.join_next().await {
            match result.unwrap() {
                Ok(_) => ok += 1,
                Err(RepoError::DuplicateCode(code)) if code == "SAME" => duplicate += 1,
                Err(_) => other += 1,
            }
        }

        assert_eq!((ok, duplicate, other), (1, 9, 0));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
