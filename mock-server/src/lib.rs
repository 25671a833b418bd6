use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Museum {
    pub museum_id: i64,
    pub name: String,
    pub city: String,
    pub annual_budget: f64,
    pub is_public: bool,
    pub opening_date: NaiveDate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MuseumInput {
    pub name: String,
    pub city: String,
    pub annual_budget: f64,
    pub is_public: bool,
    pub opening_date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub room_id: i64,
    pub name: String,
    pub capacity: f64,
    pub area: f64,
    pub is_climatized: bool,
    pub opening_date: NaiveDate,
    pub museum_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RoomInput {
    pub name: String,
    pub capacity: f64,
    pub area: f64,
    pub is_climatized: bool,
    pub opening_date: NaiveDate,
    pub museum_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuseumLabel {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomCount {
    pub museum: Option<MuseumLabel>,
    pub total: u64,
}

/// Response wrapper shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub datos: Option<T>,
    pub mensaje: String,
}

#[derive(Deserialize)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Default)]
pub struct Store {
    museums: BTreeMap<i64, Museum>,
    rooms: BTreeMap<i64, Room>,
    next_museum_id: i64,
    next_room_id: i64,
}

impl Store {
    fn museum_id(&mut self) -> i64 {
        self.next_museum_id += 1;
        self.next_museum_id
    }

    fn room_id(&mut self) -> i64 {
        self.next_room_id += 1;
        self.next_room_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    router(Db::default())
}

pub fn router(db: Db) -> Router {
    let api = Router::new()
        .route("/museums", get(list_museums).post(create_museum))
        .route("/museums/", get(list_museums))
        .route("/museums/budget", get(museums_by_budget))
        .route("/museums/between", get(museums_between))
        .route("/museums/graph", get(museum_graph))
        .route(
            "/museums/{id}",
            get(get_museum).put(update_museum).delete(delete_museum),
        )
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/", get(list_rooms))
        .route("/rooms/area", get(rooms_by_area))
        .route("/rooms/{id}", get(get_room).put(update_room).delete(delete_room));

    Router::new().nest("/api", api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reply<T: Serialize>(status: StatusCode, datos: Option<T>, mensaje: &str) -> Response {
    let body = Envelope {
        ok: status.is_success(),
        datos,
        mensaje: mensaje.to_string(),
    };
    (status, Json(body)).into_response()
}

fn fail(status: StatusCode, mensaje: &str) -> Response {
    reply::<()>(status, None, mensaje)
}

fn name_ok(value: &str) -> bool {
    (3..=100).contains(&value.chars().count())
}

fn check_museum(input: &MuseumInput) -> Result<(), &'static str> {
    if !name_ok(&input.name) {
        return Err("The name must have between 3 and 100 characters");
    }
    if !name_ok(&input.city) {
        return Err("The city must have between 3 and 100 characters");
    }
    if input.annual_budget < 0.0 {
        return Err("The annual budget cannot be negative");
    }
    Ok(())
}

fn check_room(store: &Store, input: &RoomInput) -> Result<(), &'static str> {
    if !name_ok(&input.name) {
        return Err("The name must have between 3 and 100 characters");
    }
    if input.capacity <= 0.0 {
        return Err("The capacity must be positive");
    }
    if input.area <= 0.0 {
        return Err("The area must be positive");
    }
    if !store.museums.contains_key(&input.museum_id) {
        return Err("The museum does not exist");
    }
    Ok(())
}

// --- museums ---

async fn list_museums(State(db): State<Db>) -> Response {
    let store = db.read().await;
    let museums: Vec<Museum> = store.museums.values().cloned().collect();
    reply(StatusCode::OK, Some(museums), "Museums retrieved")
}

async fn get_museum(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.museums.get(&id) {
        Some(museum) => reply(StatusCode::OK, Some(museum.clone()), "Museum retrieved"),
        None => fail(StatusCode::NOT_FOUND, "Museum not found"),
    }
}

async fn create_museum(State(db): State<Db>, Json(input): Json<MuseumInput>) -> Response {
    if let Err(msg) = check_museum(&input) {
        return fail(StatusCode::BAD_REQUEST, msg);
    }
    let mut store = db.write().await;
    let museum = Museum {
        museum_id: store.museum_id(),
        name: input.name,
        city: input.city,
        annual_budget: input.annual_budget,
        is_public: input.is_public,
        opening_date: input.opening_date,
    };
    store.museums.insert(museum.museum_id, museum.clone());
    tracing::debug!(id = museum.museum_id, "museum created");
    reply(StatusCode::CREATED, Some(museum), "Museum created")
}

async fn update_museum(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<MuseumInput>,
) -> Response {
    if let Err(msg) = check_museum(&input) {
        return fail(StatusCode::BAD_REQUEST, msg);
    }
    let mut store = db.write().await;
    let Some(museum) = store.museums.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Museum not found");
    };
    museum.name = input.name;
    museum.city = input.city;
    museum.annual_budget = input.annual_budget;
    museum.is_public = input.is_public;
    museum.opening_date = input.opening_date;
    reply::<()>(StatusCode::OK, None, "Museum updated")
}

async fn delete_museum(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut store = db.write().await;
    if store.museums.remove(&id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Museum not found");
    }
    // Rooms cannot outlive their museum.
    store.rooms.retain(|_, room| room.museum_id != id);
    reply::<()>(StatusCode::OK, None, "Museum deleted")
}

async fn museums_by_budget(State(db): State<Db>, Query(range): Query<NumberRange>) -> Response {
    let store = db.read().await;
    let museums: Vec<Museum> = store
        .museums
        .values()
        .filter(|m| m.annual_budget >= range.min && m.annual_budget <= range.max)
        .cloned()
        .collect();
    reply(StatusCode::OK, Some(museums), "Museums by budget")
}

async fn museums_between(State(db): State<Db>, Query(range): Query<DateRange>) -> Response {
    let store = db.read().await;
    let museums: Vec<Museum> = store
        .museums
        .values()
        .filter(|m| m.opening_date >= range.from && m.opening_date <= range.to)
        .cloned()
        .collect();
    reply(StatusCode::OK, Some(museums), "Museums by opening date")
}

async fn museum_graph(State(db): State<Db>) -> Response {
    let store = db.read().await;
    let mut totals: BTreeMap<i64, u64> = BTreeMap::new();
    for room in store.rooms.values() {
        *totals.entry(room.museum_id).or_default() += 1;
    }
    let counts: Vec<RoomCount> = totals
        .into_iter()
        .map(|(museum_id, total)| RoomCount {
            museum: store.museums.get(&museum_id).map(|m| MuseumLabel {
                name: m.name.clone(),
            }),
            total,
        })
        .collect();
    reply(StatusCode::OK, Some(counts), "Rooms per museum")
}

// --- rooms ---

async fn list_rooms(State(db): State<Db>) -> Response {
    let store = db.read().await;
    let rooms: Vec<Room> = store.rooms.values().cloned().collect();
    reply(StatusCode::OK, Some(rooms), "Rooms retrieved")
}

async fn get_room(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.rooms.get(&id) {
        Some(room) => reply(StatusCode::OK, Some(room.clone()), "Room retrieved"),
        None => fail(StatusCode::NOT_FOUND, "Room not found"),
    }
}

async fn create_room(State(db): State<Db>, Json(input): Json<RoomInput>) -> Response {
    let mut store = db.write().await;
    if let Err(msg) = check_room(&store, &input) {
        return fail(StatusCode::BAD_REQUEST, msg);
    }
    let room = Room {
        room_id: store.room_id(),
        name: input.name,
        capacity: input.capacity,
        area: input.area,
        is_climatized: input.is_climatized,
        opening_date: input.opening_date,
        museum_id: input.museum_id,
    };
    store.rooms.insert(room.room_id, room.clone());
    tracing::debug!(id = room.room_id, "room created");
    reply(StatusCode::CREATED, Some(room), "Room created")
}

async fn update_room(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<RoomInput>,
) -> Response {
    let mut store = db.write().await;
    if !store.rooms.contains_key(&id) {
        return fail(StatusCode::NOT_FOUND, "Room not found");
    }
    if let Err(msg) = check_room(&store, &input) {
        return fail(StatusCode::BAD_REQUEST, msg);
    }
    let room = Room {
        room_id: id,
        name: input.name,
        capacity: input.capacity,
        area: input.area,
        is_climatized: input.is_climatized,
        opening_date: input.opening_date,
        museum_id: input.museum_id,
    };
    store.rooms.insert(id, room);
    reply::<()>(StatusCode::OK, None, "Room updated")
}

async fn delete_room(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut store = db.write().await;
    match store.rooms.remove(&id) {
        Some(_) => reply::<()>(StatusCode::OK, None, "Room deleted"),
        None => fail(StatusCode::NOT_FOUND, "Room not found"),
    }
}

async fn rooms_by_area(State(db): State<Db>, Query(range): Query<NumberRange>) -> Response {
    let store = db.read().await;
    let rooms: Vec<Room> = store
        .rooms
        .values()
        .filter(|r| r.area >= range.min && r.area <= range.max)
        .cloned()
        .collect();
    reply(StatusCode::OK, Some(rooms), "Rooms by area")
}
