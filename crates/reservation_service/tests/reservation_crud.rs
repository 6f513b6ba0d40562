use chrono::NaiveDate;
use hotel_core::{PageRequest, RepoError, ServiceError};
use reservation_service::model::{
    ReservationRegister, RoomReservationRegister, UserReservationRegister,
};
use reservation_service::{
    open_db, open_db_in_memory, ReservationRepository, ReservationService,
    SqliteReservationRepository,
};
use rusqlite::Connection;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, day).unwrap()
}

fn register(user_id: i64, start: u32, end: u32, rooms: &[i64]) -> ReservationRegister {
    ReservationRegister {
        user_id,
        start_date: Some(date(start)),
        end_date: Some(date(end)),
        user_reservations: vec![UserReservationRegister { user_id }],
        room_reservations: rooms
            .iter()
            .map(|&room_id| RoomReservationRegister { room_id })
            .collect(),
    }
}

fn service(conn: &Connection) -> ReservationService<SqliteReservationRepository<'_>> {
    ReservationService::new(SqliteReservationRepository::try_new(conn).unwrap())
}

#[test]
fn save_and_find_with_children() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let saved = service.save(&register(5, 1, 4, &[101, 102])).unwrap();
    assert_eq!(saved.user_id, 5);
    assert_eq!(saved.start_date, Some(date(1)));
    assert_eq!(saved.end_date, Some(date(4)));
    assert_eq!(saved.user_reservations.len(), 1);
    assert_eq!(saved.user_reservations[0].user_id, 5);
    assert_eq!(saved.room_ids(), vec![101, 102]);

    let loaded = service.find_by_id(saved.id).unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn save_without_dates_or_children() {
    let conn = open_db_in_memory().unwrap();
    let saved = service(&conn)
        .save(&ReservationRegister {
            user_id: 3,
            start_date: None,
            end_date: None,
            user_reservations: Vec::new(),
            room_reservations: Vec::new(),
        })
        .unwrap();
    assert!(saved.start_date.is_none());
    assert!(saved.room_reservations.is_empty());
}

#[test]
fn find_by_id_missing_message() {
    let conn = open_db_in_memory().unwrap();
    let err = service(&conn).find_by_id(9).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(err.to_string(), "Reservation with id 9 not found.");
}

#[test]
fn update_replaces_everything_but_identity() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let saved = service.save(&register(5, 1, 4, &[101, 102])).unwrap();

    let updated = service
        .update(saved.id, &register(6, 10, 12, &[201]))
        .unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.created_at, saved.created_at);
    assert_eq!(updated.user_id, 6);
    assert_eq!(updated.start_date, Some(date(10)));
    assert_eq!(updated.end_date, Some(date(12)));
    assert_eq!(updated.room_ids(), vec![201]);
    assert_eq!(updated.user_reservations[0].user_id, 6);

    let child_rows: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM user_reservations) + (SELECT COUNT(*) FROM room_reservations);",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(child_rows, 2);
}

#[test]
fn update_missing_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = service(&conn)
        .update(77, &register(1, 1, 2, &[]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Reservation with id 77 not found.");
}

#[test]
fn delete_removes_children() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let saved = service.save(&register(5, 1, 4, &[101])).unwrap();

    service.delete_by_id(saved.id).unwrap();
    assert!(service.find_all().unwrap().is_empty());

    let child_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM room_reservations;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(child_rows, 0);

    assert!(matches!(
        service.delete_by_id(saved.id),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn paged_filters_match_exactly() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.save(&register(1, 1, 3, &[10])).unwrap();
    service.save(&register(1, 5, 7, &[11])).unwrap();
    service.save(&register(2, 1, 7, &[12])).unwrap();
    let page = PageRequest::default();

    let by_user = service.find_by_user_id(1, page).unwrap();
    assert_eq!(by_user.page.total_elements, 2);
    assert!(by_user.content.iter().all(|r| r.user_id == 1));

    let by_start = service.find_by_start_date(date(1), page).unwrap();
    let users: Vec<i64> = by_start.content.iter().map(|r| r.user_id).collect();
    assert_eq!(users, vec![1, 2]);

    let by_end = service.find_by_end_date(date(7), page).unwrap();
    assert_eq!(by_end.page.total_elements, 2);
    assert_eq!(by_end.content[0].start_date, Some(date(5)));

    let none = service.find_by_end_date(date(30), page).unwrap();
    assert!(none.content.is_empty());
    assert_eq!(none.page.total_pages, 0);

    let second = service
        .find_by_user_id(1, PageRequest::of(1, Some(1)))
        .unwrap();
    assert_eq!(second.content.len(), 1);
    assert_eq!(second.content[0].start_date, Some(date(5)));
}

#[test]
fn repository_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    assert!(repo.find_reservation(1).unwrap().is_none());
    assert!(!repo.reservation_exists(1).unwrap());
    assert!(matches!(
        repo.delete_reservation(1),
        Err(RepoError::NotFound {
            entity: "reservation",
            id: 1
        })
    ));
}

#[test]
fn reservations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reservations.sqlite3");

    let id = {
        let conn = open_db(&path).unwrap();
        service(&conn).save(&register(8, 2, 3, &[5])).unwrap().id
    };

    let conn = open_db(&path).unwrap();
    let loaded = service(&conn).find_by_id(id).unwrap();
    assert_eq!(loaded.user_id, 8);
    assert_eq!(loaded.room_ids(), vec![5]);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(SqliteReservationRepository::try_new(&conn).is_err());
}

#[test]
fn storage_failures_surface_service_messages() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let stored = service.save(&register(5, 1, 4, &[101])).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_room_links BEFORE INSERT ON room_reservations
         BEGIN SELECT RAISE(ABORT, 'room links rejected'); END;
         CREATE TRIGGER reject_reservation_delete BEFORE DELETE ON reservations
         BEGIN SELECT RAISE(ABORT, 'delete rejected'); END;",
    )
    .unwrap();

    let expect_unexpected = |err: ServiceError, expected: &str| match err {
        ServiceError::Unexpected { message, .. } => assert_eq!(message, expected),
        other => panic!("unexpected error: {other:?}"),
    };

    expect_unexpected(
        service.save(&register(6, 2, 3, &[102])).unwrap_err(),
        "Unexpected error while saving reservation.",
    );
    expect_unexpected(
        service.update(stored.id, &register(5, 2, 6, &[103])).unwrap_err(),
        "Unexpected error while updating reservation.",
    );
    expect_unexpected(
        service.delete_by_id(stored.id).unwrap_err(),
        "Unexpected error while deleting the reservation.",
    );

    let unchanged = service.find_by_id(stored.id).unwrap();
    assert_eq!(unchanged.room_ids(), vec![101]);
    assert_eq!(unchanged.end_date, Some(date(4)));
    assert_eq!(service.find_all().unwrap().len(), 1);
}
