// SPDX-License-Identifier: MIT

//! Firestore integration tests (require the emulator).

use skyops::models::{Aircraft, AuthorizationRecord, Identity, Role};
use skyops::services::session::resolve_role;

mod common;

fn record(uid: &str) -> AuthorizationRecord {
    AuthorizationRecord {
        uid: uid.to_string(),
        email: format!("{uid}@example.com"),
        username: uid.to_string(),
    }
}

#[tokio::test]
async fn test_aircraft_crud_round_trip() {
    require_emulator!();
    let db = common::test_db().await;

    let aircraft = Aircraft {
        registration: "N-CRUD-1".to_string(),
        model: "C172".to_string(),
        manufacturer: "Cessna".to_string(),
        seats: 4,
        year: Some(1998),
        created_at: "2026-03-01T10:00:00Z".to_string(),
    };

    db.upsert_aircraft(&aircraft).await.unwrap();

    let fetched = db.get_aircraft("N-CRUD-1").await.unwrap().unwrap();
    assert_eq!(fetched.model, "C172");
    assert_eq!(fetched.seats, 4);

    db.delete_aircraft("N-CRUD-1").await.unwrap();
    assert!(db.get_aircraft("N-CRUD-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_role_assignment_and_resolution() {
    require_emulator!();
    let db = common::test_db().await;

    let uid = "role-test-user";
    db.delete_user_roles(uid).await.unwrap();

    let identity = Identity {
        uid: uid.to_string(),
        email: format!("{uid}@example.com"),
    };

    // No membership anywhere: no role.
    let resolution = resolve_role(&db, &identity).await;
    assert_eq!(resolution.role, None);

    // Assign open.
    db.set_user_role(&record(uid), Role::Open).await.unwrap();
    let resolution = resolve_role(&db, &identity).await;
    assert_eq!(resolution.role, Some(Role::Open));

    // Promote to admin; the open membership must be removed in the same
    // operation so the sets stay disjoint.
    db.set_user_role(&record(uid), Role::Admin).await.unwrap();
    assert!(db.is_role_member(Role::Admin, uid).await.unwrap());
    assert!(!db.is_role_member(Role::Open, uid).await.unwrap());

    let resolution = resolve_role(&db, &identity).await;
    assert_eq!(resolution.role, Some(Role::Admin));

    db.delete_user_roles(uid).await.unwrap();
    let resolution = resolve_role(&db, &identity).await;
    assert_eq!(resolution.role, None);
}

#[tokio::test]
async fn test_fuel_ledger_append_and_list() {
    require_emulator!();
    let db = common::test_db().await;

    let transaction = skyops::models::FuelTransaction {
        id: uuid::Uuid::new_v4().to_string(),
        transaction_date: "2026-03-01T10:00:00Z".to_string(),
        customer_type: skyops::models::CustomerType::Refueling,
        aircraft_id: None,
        start_quantity: 120.0,
        liters: 35.0,
        left_over_quantity: 155.0,
        cost: Some(420.0),
        created_at: "2026-03-01T10:00:05Z".to_string(),
    };

    db.add_fuel_log(&transaction).await.unwrap();

    let logs = db.list_fuel_logs(10, 0).await.unwrap();
    assert!(logs.iter().any(|t| t.id == transaction.id));

    // Append-only: inserting the same document again must fail.
    assert!(db.add_fuel_log(&transaction).await.is_err());
}
