//! Room feature repository contracts and SQLite implementation.

use crate::db::{MIGRATIONS, REQUIRED_TABLES};
use crate::model::{RoomFeature, RoomFeatureDraft, RoomFeatureId};
use hotel_core::db::{audit_now, ensure_connection_ready};
use hotel_core::{Page, PageRequest, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};

const FEATURE_SELECT_SQL: &str = "SELECT
    id,
    service_name,
    service_price,
    created_at,
    updated_at
FROM room_features";

/// Repository interface for room feature CRUD operations.
pub trait RoomFeatureRepository {
    fn insert_feature(&self, draft: &RoomFeatureDraft) -> RepoResult<RoomFeatureId>;
    fn update_feature(&self, id: RoomFeatureId, draft: &RoomFeatureDraft) -> RepoResult<()>;
    fn find_feature(&self, id: RoomFeatureId) -> RepoResult<Option<RoomFeature>>;
    fn find_all_features(&self) -> RepoResult<Vec<RoomFeature>>;
    fn find_feature_page(&self, page: PageRequest) -> RepoResult<Page<RoomFeature>>;
    /// Returns the subset of `ids` that exist, ordered by id.
    fn find_features_by_ids(&self, ids: &[RoomFeatureId]) -> RepoResult<Vec<RoomFeature>>;
    fn delete_feature(&self, id: RoomFeatureId) -> RepoResult<()>;
}

/// SQLite-backed room feature repository.
pub struct SqliteRoomFeatureRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoomFeatureRepository<'conn> {
    /// Wraps a connection after checking it carries the room schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, MIGRATIONS, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl RoomFeatureRepository for SqliteRoomFeatureRepository<'_> {
    fn insert_feature(&self, draft: &RoomFeatureDraft) -> RepoResult<RoomFeatureId> {
        let now = audit_now();
        self.conn.execute(
            "INSERT INTO room_features (
                service_name,
                service_price,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?3);",
            params![draft.service_name, draft.service_price, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_feature(&self, id: RoomFeatureId, draft: &RoomFeatureDraft) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE room_features
             SET
                service_name = ?1,
                service_price = ?2,
                updated_at = ?3
             WHERE id = ?4;",
            params![draft.service_name, draft.service_price, audit_now(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "room feature",
                id,
            });
        }

        Ok(())
    }

    fn find_feature(&self, id: RoomFeatureId) -> RepoResult<Option<RoomFeature>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FEATURE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_feature_row(row)?));
        }
        Ok(None)
    }

    fn find_all_features(&self) -> RepoResult<Vec<RoomFeature>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FEATURE_SELECT_SQL} ORDER BY id ASC;"))?;
        let features = stmt
            .query_map([], parse_feature_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(features)
    }

    fn find_feature_page(&self, page: PageRequest) -> RepoResult<Page<RoomFeature>> {
        let total: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM room_features;", [], |row| row.get(0))?;

        let mut stmt = self.conn.prepare(&format!(
            "{FEATURE_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let features = stmt
            .query_map(params![page.limit(), page.offset()], parse_feature_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(features, page, count_to_u64(total)?))
    }

    fn find_features_by_ids(&self, ids: &[RoomFeatureId]) -> RepoResult<Vec<RoomFeature>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "{FEATURE_SELECT_SQL} WHERE id IN ({placeholders}) ORDER BY id ASC;"
        ))?;
        let features = stmt
            .query_map(params_from_iter(ids.iter()), parse_feature_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(features)
    }

    fn delete_feature(&self, id: RoomFeatureId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM room_features WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "room feature",
                id,
            });
        }

        Ok(())
    }
}

pub(crate) fn parse_feature_row(row: &Row<'_>) -> rusqlite::Result<RoomFeature> {
    Ok(RoomFeature {
        id: row.get("id")?,
        service_name: row.get("service_name")?,
        service_price: row.get("service_price")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn count_to_u64(count: i64) -> RepoResult<u64> {
    u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
}
