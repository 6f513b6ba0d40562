//! Reservation repository contracts and SQLite implementation.

use crate::db::{MIGRATIONS, REQUIRED_TABLES};
use crate::model::{Reservation, ReservationDraft, ReservationId, RoomReservation, UserReservation};
use chrono::{NaiveDate, NaiveDateTime};
use hotel_core::db::{audit_now, ensure_connection_ready};
use hotel_core::{Page, PageRequest, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const RESERVATION_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    start_date,
    end_date,
    created_at,
    updated_at
FROM reservations";

/// Row filter for paged reservation listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationFilter {
    UserId(i64),
    StartDate(NaiveDate),
    EndDate(NaiveDate),
}

impl ReservationFilter {
    fn where_clause(&self) -> (&'static str, Value) {
        match *self {
            Self::UserId(user_id) => (" WHERE user_id = ?", Value::Integer(user_id)),
            Self::StartDate(date) => (" WHERE start_date = ?", Value::Text(date.to_string())),
            Self::EndDate(date) => (" WHERE end_date = ?", Value::Text(date.to_string())),
        }
    }
}

/// Repository interface for reservations and their child rows.
pub trait ReservationRepository {
    fn insert_reservation(&self, draft: &ReservationDraft) -> RepoResult<ReservationId>;
    /// Overwrites every field except id and `created_at`.
    fn update_reservation(&self, id: ReservationId, draft: &ReservationDraft) -> RepoResult<()>;
    fn reservation_exists(&self, id: ReservationId) -> RepoResult<bool>;
    fn find_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>>;
    fn find_all_reservations(&self) -> RepoResult<Vec<Reservation>>;
    fn find_reservation_page(
        &self,
        filter: &ReservationFilter,
        page: PageRequest,
    ) -> RepoResult<Page<Reservation>>;
    fn delete_reservation(&self, id: ReservationId) -> RepoResult<()>;
}

/// SQLite-backed reservation repository.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    /// Wraps a connection after checking it carries the reservation schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, MIGRATIONS, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn insert_reservation(&self, draft: &ReservationDraft) -> RepoResult<ReservationId> {
        let now = audit_now();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO reservations (
                user_id,
                start_date,
                end_date,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?4);",
            params![draft.user_id, draft.start_date, draft.end_date, now],
        )?;
        let id = tx.last_insert_rowid();

        insert_children(&tx, id, draft, now)?;

        tx.commit()?;
        Ok(id)
    }

    fn update_reservation(&self, id: ReservationId, draft: &ReservationDraft) -> RepoResult<()> {
        let now = audit_now();
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE reservations
             SET
                user_id = ?1,
                start_date = ?2,
                end_date = ?3,
                updated_at = ?4
             WHERE id = ?5;",
            params![draft.user_id, draft.start_date, draft.end_date, now, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "reservation",
                id,
            });
        }

        tx.execute(
            "DELETE FROM user_reservations WHERE reservation_id = ?1;",
            [id],
        )?;
        tx.execute(
            "DELETE FROM room_reservations WHERE reservation_id = ?1;",
            [id],
        )?;
        insert_children(&tx, id, draft, now)?;

        tx.commit()?;
        Ok(())
    }

    fn reservation_exists(&self, id: ReservationId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_reservation(&self, id: ReservationId) -> RepoResult<Option<Reservation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESERVATION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut reservation = parse_reservation_row(row)?;
        load_children(self.conn, &mut reservation)?;
        Ok(Some(reservation))
    }

    fn find_all_reservations(&self) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESERVATION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut reservations = stmt
            .query_map([], parse_reservation_row)?
            .collect::<Result<Vec<_>, _>>()?;
        for reservation in &mut reservations {
            load_children(self.conn, reservation)?;
        }
        Ok(reservations)
    }

    fn find_reservation_page(
        &self,
        filter: &ReservationFilter,
        page: PageRequest,
    ) -> RepoResult<Page<Reservation>> {
        let (where_clause, bind_value) = filter.where_clause();

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM reservations{where_clause};"),
            [&bind_value],
            |row| row.get(0),
        )?;

        let bind_values = vec![
            bind_value,
            Value::Integer(page.limit()),
            Value::Integer(page.offset()),
        ];
        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL}{where_clause} ORDER BY id ASC LIMIT ? OFFSET ?;"
        ))?;
        let mut reservations = stmt
            .query_map(params_from_iter(bind_values), parse_reservation_row)?
            .collect::<Result<Vec<_>, _>>()?;
        for reservation in &mut reservations {
            load_children(self.conn, reservation)?;
        }

        let total = u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{total}`")))?;
        Ok(Page::new(reservations, page, total))
    }

    fn delete_reservation(&self, id: ReservationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reservations WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "reservation",
                id,
            });
        }
        Ok(())
    }
}

fn insert_children(
    conn: &Connection,
    reservation_id: ReservationId,
    draft: &ReservationDraft,
    now: NaiveDateTime,
) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO user_reservations (reservation_id, user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3);",
    )?;
    for user_id in &draft.user_ids {
        stmt.execute(params![reservation_id, user_id, now])?;
    }

    let mut stmt = conn.prepare(
        "INSERT INTO room_reservations (reservation_id, room_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3);",
    )?;
    for room_id in &draft.room_ids {
        stmt.execute(params![reservation_id, room_id, now])?;
    }

    Ok(())
}

fn load_children(conn: &Connection, reservation: &mut Reservation) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, created_at, updated_at
         FROM user_reservations
         WHERE reservation_id = ?1
         ORDER BY id ASC;",
    )?;
    reservation.user_reservations = stmt
        .query_map([reservation.id], |row| {
            Ok(UserReservation {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT id, room_id, created_at, updated_at
         FROM room_reservations
         WHERE reservation_id = ?1
         ORDER BY id ASC;",
    )?;
    reservation.room_reservations = stmt
        .query_map([reservation.id], |row| {
            Ok(RoomReservation {
                id: row.get("id")?,
                room_id: row.get("room_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(())
}

fn parse_reservation_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        user_reservations: Vec::new(),
        room_reservations: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
