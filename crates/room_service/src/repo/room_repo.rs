//! Room repository contracts and SQLite implementation.
//!
//! # Invariants
//! - A room row, its images and its feature links are written in one
//!   transaction.
//! - Listing order is `id ASC` for rooms, images and features alike.

use super::room_feature_repo::{count_to_u64, parse_feature_row};
use crate::db::{MIGRATIONS, REQUIRED_TABLES};
use crate::model::{
    Room, RoomDraft, RoomFeature, RoomFeatureId, RoomId, RoomImage, RoomState, RoomType,
};
use chrono::NaiveDateTime;
use hotel_core::db::{audit_now, ensure_connection_ready};
use hotel_core::{Page, PageRequest, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ROOM_SELECT_SQL: &str = "SELECT
    id,
    room_number,
    price_by_night,
    room_type,
    room_state,
    created_at,
    updated_at
FROM rooms";

/// Row filter for paged room listings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoomFilter {
    All,
    /// Inclusive on both bounds.
    PriceBetween { min: f64, max: f64 },
    /// Strictly greater.
    PriceGreaterThan(f64),
    /// Strictly lower.
    PriceLessThan(f64),
    Type(RoomType),
    State(RoomState),
    TypeAndState(RoomType, RoomState),
}

impl RoomFilter {
    fn where_clause(&self) -> (&'static str, Vec<Value>) {
        match *self {
            Self::All => ("", Vec::new()),
            Self::PriceBetween { min, max } => (
                " WHERE price_by_night >= ? AND price_by_night <= ?",
                vec![Value::Real(min), Value::Real(max)],
            ),
            Self::PriceGreaterThan(price) => {
                (" WHERE price_by_night > ?", vec![Value::Real(price)])
            }
            Self::PriceLessThan(price) => (" WHERE price_by_night < ?", vec![Value::Real(price)]),
            Self::Type(room_type) => (
                " WHERE room_type = ?",
                vec![Value::Text(room_type.as_db_str().to_string())],
            ),
            Self::State(room_state) => (
                " WHERE room_state = ?",
                vec![Value::Text(room_state.as_db_str().to_string())],
            ),
            Self::TypeAndState(room_type, room_state) => (
                " WHERE room_type = ? AND room_state = ?",
                vec![
                    Value::Text(room_type.as_db_str().to_string()),
                    Value::Text(room_state.as_db_str().to_string()),
                ],
            ),
        }
    }
}

/// Repository interface for rooms and their owned collections.
pub trait RoomRepository {
    /// Inserts a room with its images and feature links; returns the new id.
    fn insert_room(&self, draft: &RoomDraft, feature_ids: &[RoomFeatureId]) -> RepoResult<RoomId>;
    /// Overwrites the room fields and replaces images and feature links.
    fn update_room(
        &self,
        id: RoomId,
        draft: &RoomDraft,
        feature_ids: &[RoomFeatureId],
    ) -> RepoResult<()>;
    fn room_exists(&self, id: RoomId) -> RepoResult<bool>;
    fn find_room(&self, id: RoomId) -> RepoResult<Option<Room>>;
    fn find_room_page(&self, filter: &RoomFilter, page: PageRequest) -> RepoResult<Page<Room>>;
    /// Deletes a room; images and feature links go with it.
    fn delete_room(&self, id: RoomId) -> RepoResult<()>;
}

/// SQLite-backed room repository.
pub struct SqliteRoomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoomRepository<'conn> {
    /// Wraps a connection after checking it carries the room schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, MIGRATIONS, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl RoomRepository for SqliteRoomRepository<'_> {
    fn insert_room(&self, draft: &RoomDraft, feature_ids: &[RoomFeatureId]) -> RepoResult<RoomId> {
        let now = audit_now();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO rooms (
                room_number,
                price_by_night,
                room_type,
                room_state,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                draft.room_number,
                draft.price_by_night,
                draft.room_type.as_db_str(),
                draft.room_state.as_db_str(),
                now
            ],
        )?;
        let room_id = tx.last_insert_rowid();

        insert_images(&tx, room_id, &draft.image_paths, now)?;
        insert_feature_links(&tx, room_id, feature_ids)?;

        tx.commit()?;
        Ok(room_id)
    }

    fn update_room(
        &self,
        id: RoomId,
        draft: &RoomDraft,
        feature_ids: &[RoomFeatureId],
    ) -> RepoResult<()> {
        let now = audit_now();
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE rooms
             SET
                room_number = ?1,
                price_by_night = ?2,
                room_type = ?3,
                room_state = ?4,
                updated_at = ?5
             WHERE id = ?6;",
            params![
                draft.room_number,
                draft.price_by_night,
                draft.room_type.as_db_str(),
                draft.room_state.as_db_str(),
                now,
                id
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "room", id });
        }

        tx.execute("DELETE FROM images WHERE room_id = ?1;", [id])?;
        insert_images(&tx, id, &draft.image_paths, now)?;

        tx.execute(
            "DELETE FROM room_additional_features WHERE room_id = ?1;",
            [id],
        )?;
        insert_feature_links(&tx, id, feature_ids)?;

        tx.commit()?;
        Ok(())
    }

    fn room_exists(&self, id: RoomId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM rooms WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_room(&self, id: RoomId) -> RepoResult<Option<Room>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ROOM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut room = parse_room_row(row)?;
        load_children(self.conn, &mut room)?;
        Ok(Some(room))
    }

    fn find_room_page(&self, filter: &RoomFilter, page: PageRequest) -> RepoResult<Page<Room>> {
        let (where_clause, mut bind_values) = filter.where_clause();

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM rooms{where_clause};"),
            params_from_iter(bind_values.iter()),
            |row| row.get(0),
        )?;

        bind_values.push(Value::Integer(page.limit()));
        bind_values.push(Value::Integer(page.offset()));
        let mut stmt = self.conn.prepare(&format!(
            "{ROOM_SELECT_SQL}{where_clause} ORDER BY id ASC LIMIT ? OFFSET ?;"
        ))?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;

        let mut rooms = Vec::new();
        while let Some(row) = rows.next()? {
            rooms.push(parse_room_row(row)?);
        }
        for room in &mut rooms {
            load_children(self.conn, room)?;
        }

        Ok(Page::new(rooms, page, count_to_u64(total)?))
    }

    fn delete_room(&self, id: RoomId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM rooms WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "room", id });
        }
        Ok(())
    }
}

fn insert_images(
    conn: &Connection,
    room_id: RoomId,
    paths: &[String],
    now: NaiveDateTime,
) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO images (path, room_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3);",
    )?;
    for path in paths {
        stmt.execute(params![path, room_id, now])?;
    }
    Ok(())
}

fn insert_feature_links(
    conn: &Connection,
    room_id: RoomId,
    feature_ids: &[RoomFeatureId],
) -> RepoResult<()> {
    // Duplicate ids in the request collapse onto the composite key.
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO room_additional_features (room_id, room_feature_id)
         VALUES (?1, ?2);",
    )?;
    for feature_id in feature_ids {
        stmt.execute(params![room_id, feature_id])?;
    }
    Ok(())
}

fn load_children(conn: &Connection, room: &mut Room) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "SELECT id, path, room_id, created_at, updated_at
         FROM images
         WHERE room_id = ?1
         ORDER BY id ASC;",
    )?;
    room.room_images = stmt
        .query_map([room.id], |row| {
            Ok(RoomImage {
                id: row.get("id")?,
                path: row.get("path")?,
                room_id: row.get("room_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT f.id, f.service_name, f.service_price, f.created_at, f.updated_at
         FROM room_features f
         INNER JOIN room_additional_features l ON l.room_feature_id = f.id
         WHERE l.room_id = ?1
         ORDER BY f.id ASC;",
    )?;
    room.room_features = stmt
        .query_map([room.id], parse_feature_row)?
        .collect::<Result<Vec<RoomFeature>, _>>()?;

    Ok(())
}

fn parse_room_row(row: &Row<'_>) -> RepoResult<Room> {
    let raw_type: String = row.get("room_type")?;
    let room_type = RoomType::from_db_str(&raw_type)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid room_type `{raw_type}`")))?;
    let raw_state: String = row.get("room_state")?;
    let room_state = RoomState::from_db_str(&raw_state)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid room_state `{raw_state}`")))?;

    Ok(Room {
        id: row.get("id")?,
        room_number: row.get("room_number")?,
        price_by_night: row.get("price_by_night")?,
        room_type,
        room_state,
        room_images: Vec::new(),
        room_features: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
