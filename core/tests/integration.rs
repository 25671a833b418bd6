//! End-to-end tests of the adapter and admin actions against a live mock
//! server.
//!
//! # Design
//! Each test starts its own mock server on a random port (fresh in-memory
//! store), then drives the public `Admin`/`Adapter` API over real HTTP.

use std::io::Read;
use std::net::SocketAddr;
use std::time::Duration;

use assert_matches::assert_matches;
use museo_core::{
    ActionError, Adapter, Admin, ApiConfig, MuseumEdit, MuseumForm, RoomEdit, RoomForm,
    NO_RESPONSE_MESSAGE,
};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn admin_for(addr: SocketAddr) -> Admin {
    Admin::new(Adapter::new(&ApiConfig::new(format!("http://{addr}/api"))))
}

fn museum_form(name: &str, budget: &str, opened: &str) -> MuseumForm {
    MuseumForm {
        name: name.to_string(),
        city: "Madrid".to_string(),
        annual_budget: budget.to_string(),
        is_public: Some("true".to_string()),
        opening_date: opened.to_string(),
    }
}

fn room_form(name: &str, area: &str, museum_id: i64) -> RoomForm {
    RoomForm {
        name: name.to_string(),
        capacity: "25".to_string(),
        area: area.to_string(),
        is_climatized: Some("true".to_string()),
        opening_date: "2010-04-01".to_string(),
        museum_id: museum_id.to_string(),
    }
}

#[test]
fn museum_lifecycle() {
    let admin = admin_for(start_server());

    assert!(admin.list_museums().unwrap().is_empty());

    let msg = admin
        .create_museum(&museum_form("Museo del Prado", "1500", "1819-11-19"))
        .unwrap();
    assert_eq!(msg, "Museum created");
    admin
        .create_museum(&museum_form("Museo Sorolla", "80", "1932-06-11"))
        .unwrap();

    let museums = admin.list_museums().unwrap();
    assert_eq!(museums.len(), 2);
    let prado = museums.iter().find(|m| m.name == "Museo del Prado").unwrap();

    // edit only the city; everything else keeps its stored value
    let msg = admin
        .edit_museum(
            prado.museum_id,
            MuseumEdit {
                city: Some("Toledo".to_string()),
                ..MuseumEdit::default()
            },
        )
        .unwrap();
    assert_eq!(msg, "Museum updated");
    let edited = admin.museum(prado.museum_id).unwrap();
    assert_eq!(edited.city, "Toledo");
    assert_eq!(edited.annual_budget, 1500.0);

    let cheap = admin.search_by_budget("0", "100").unwrap();
    assert_eq!(cheap.len(), 1);
    assert_eq!(cheap[0].name, "Museo Sorolla");

    let old = admin
        .search_by_opening_date("1800-01-01", "1900-01-01")
        .unwrap();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].museum_id, prado.museum_id);

    let deleted = admin.delete_museum(prado.museum_id).unwrap();
    assert_eq!(deleted.message, "Museum deleted");
    assert_eq!(deleted.remaining.len(), 1);
    assert!(deleted.remaining.iter().all(|m| m.museum_id != prado.museum_id));
}

#[test]
fn room_listing_joins_museum_names_and_delete_reloads() {
    let admin = admin_for(start_server());
    admin
        .create_museum(&museum_form("Museo Picasso", "500", "2003-10-27"))
        .unwrap();
    let museum_id = admin.list_museums().unwrap()[0].museum_id;

    admin.create_room(&room_form("Sala Azul", "120", museum_id)).unwrap();
    admin.create_room(&room_form("Sala Rosa", "45.5", museum_id)).unwrap();

    let rows = admin.list_rooms().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.museum_name == "Museo Picasso"));

    let large = admin.search_rooms_by_area("100", "200").unwrap();
    assert_eq!(large.len(), 1);
    assert_eq!(large[0].room.name, "Sala Azul");
    assert_eq!(large[0].museum_name, "Museo Picasso");

    let counts = admin.room_counts().unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].label(), "Museo Picasso");
    assert_eq!(counts[0].total, 2);

    let target = large[0].room.room_id;
    let deleted = admin.delete_room(target).unwrap();
    assert_eq!(deleted.message, "Room deleted");
    assert_eq!(deleted.remaining.len(), 1);
    assert!(deleted.remaining.iter().all(|r| r.room.room_id != target));
}

#[test]
fn edit_room_validates_overlaid_form() {
    let admin = admin_for(start_server());
    admin
        .create_museum(&museum_form("Museo Reina Sofia", "900", "1992-09-10"))
        .unwrap();
    let museum_id = admin.list_museums().unwrap()[0].museum_id;
    admin.create_room(&room_form("Sala Guernica", "300", museum_id)).unwrap();
    let room_id = admin.list_rooms().unwrap()[0].room.room_id;

    let err = admin
        .edit_room(
            room_id,
            RoomEdit {
                capacity: Some("0".to_string()),
                ..RoomEdit::default()
            },
        )
        .unwrap_err();
    assert_matches!(err, ActionError::Form(_));

    admin
        .edit_room(
            room_id,
            RoomEdit {
                capacity: Some("80".to_string()),
                ..RoomEdit::default()
            },
        )
        .unwrap();
    assert_eq!(admin.room(room_id).unwrap().capacity, 80.0);

    let err = admin
        .edit_room(
            room_id,
            RoomEdit {
                museum_id: Some("77".to_string()),
                ..RoomEdit::default()
            },
        )
        .unwrap_err();
    assert_matches!(err, ActionError::UnknownMuseum(77));
}

#[test]
fn create_room_for_unknown_museum_is_rejected_client_side() {
    let admin = admin_for(start_server());
    let err = admin.create_room(&room_form("Sala Fantasma", "10", 5)).unwrap_err();
    assert_matches!(err, ActionError::UnknownMuseum(5));
}

#[test]
fn server_message_is_surfaced_verbatim() {
    let admin = admin_for(start_server());

    let err = admin.museum(404).unwrap_err();
    assert_matches!(err, ActionError::Api(ref e) if e.message == "Museum not found");

    let err = admin.delete_room(3).unwrap_err();
    assert_eq!(err.to_string(), "Room not found");
}

#[test]
fn server_side_validation_message_reaches_caller() {
    let addr = start_server();
    let adapter = Adapter::new(&ApiConfig::new(format!("http://{addr}/api")));
    // Bypass the form so the server's own check answers.
    let input = museo_core::NewMuseum {
        name: "Ab".to_string(),
        city: "Madrid".to_string(),
        annual_budget: 1.0,
        is_public: true,
        opening_date: chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    };
    let err = adapter.create_museum(&input).unwrap_err();
    assert!(!err.ok);
    assert!(err.data.is_none());
    assert_eq!(err.message, "The name must have between 3 and 100 characters");
}

#[test]
fn status_without_message_falls_back_to_code_and_reason() {
    let addr = start_server();
    let adapter = Adapter::new(&ApiConfig::new(format!("http://{addr}/elsewhere")));
    let err = adapter.list_museums().unwrap_err();
    assert_eq!(err.message, "Error: 404 Not Found");
}

#[test]
fn silent_server_times_out_with_connectivity_message() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        // Accept and read, never answer.
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            std::thread::sleep(Duration::from_secs(5));
        }
    });

    let config =
        ApiConfig::new(format!("http://{addr}/api")).with_timeout(Duration::from_millis(300));
    let err = Adapter::new(&config).list_museums().unwrap_err();
    assert_eq!(err.message, NO_RESPONSE_MESSAGE);
}

#[test]
fn joined_listing_fails_when_either_fetch_fails() {
    let addr = start_server();
    // Both halves of the fan-out hit a base path that does not exist.
    let adapter = Adapter::new(&ApiConfig::new(format!("http://{addr}/missing")));
    let err = Admin::new(adapter).list_rooms().unwrap_err();
    assert_matches!(err, ActionError::Api(ref e) if e.message == "Error: 404 Not Found");
}
