//! Administrative actions: what each screen of the console does.
//!
//! # Design
//! `Admin` sits on top of `Adapter` and performs one user action per method:
//! validate input, issue the request(s), and shape the result for display.
//! Validation always runs first, so an invalid form or search never produces
//! network traffic. Nothing is cached; every listing re-fetches.

use std::collections::HashMap;

use serde::Serialize;

use crate::adapter::Adapter;
use crate::error::NormalizedError;
use crate::types::{Museum, MuseumId, Room, RoomCount, RoomId, RoomRow, UNKNOWN_MUSEUM};
use crate::validation::{
    DateRange, FormErrors, MuseumEdit, MuseumForm, NumericRange, RangeError, RoomEdit, RoomForm,
};

pub const MUSEUM_CREATED: &str = "Museum created successfully";
pub const MUSEUM_UPDATED: &str = "Museum updated successfully";
pub const MUSEUM_DELETED: &str = "Museum deleted successfully";
pub const ROOM_CREATED: &str = "Room created successfully";
pub const ROOM_UPDATED: &str = "Room updated successfully";
pub const ROOM_DELETED: &str = "Room deleted successfully";

/// Why an action did not complete.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Form(#[from] FormErrors),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("museum {0} does not exist")]
    UnknownMuseum(MuseumId),

    #[error(transparent)]
    Api(#[from] NormalizedError),
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Result of a delete: the confirmation message and the reloaded listing.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted<T> {
    pub message: String,
    pub remaining: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct Admin {
    api: Adapter,
}

impl Admin {
    pub fn new(api: Adapter) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Adapter {
        &self.api
    }

    // -- museums ------------------------------------------------------------

    pub fn list_museums(&self) -> ActionResult<Vec<Museum>> {
        Ok(self.api.list_museums()?)
    }

    pub fn museum(&self, id: MuseumId) -> ActionResult<Museum> {
        Ok(self.api.get_museum(id)?)
    }

    pub fn create_museum(&self, form: &MuseumForm) -> ActionResult<String> {
        let input = form.validate()?;
        let message = self.api.create_museum(&input)?;
        tracing::info!(name = %input.name, "museum created");
        Ok(message.unwrap_or_else(|| MUSEUM_CREATED.to_string()))
    }

    /// Load the current record, overlay the changed fields, validate, and
    /// replace it.
    pub fn edit_museum(&self, id: MuseumId, edit: MuseumEdit) -> ActionResult<String> {
        let current = self.api.get_museum(id)?;
        let mut form = MuseumForm::from(&current);
        form.apply(edit);
        let input = form.validate()?;
        let message = self.api.update_museum(id, &input)?;
        tracing::info!(id, "museum updated");
        Ok(message.unwrap_or_else(|| MUSEUM_UPDATED.to_string()))
    }

    pub fn delete_museum(&self, id: MuseumId) -> ActionResult<Deleted<Museum>> {
        let message = self.api.delete_museum(id)?;
        tracing::info!(id, "museum deleted");
        Ok(Deleted {
            message: message.unwrap_or_else(|| MUSEUM_DELETED.to_string()),
            remaining: self.api.list_museums()?,
        })
    }

    pub fn search_by_budget(&self, min: &str, max: &str) -> ActionResult<Vec<Museum>> {
        let range = NumericRange::parse(min, max)?;
        Ok(self.api.museums_by_budget(range.min, range.max)?)
    }

    pub fn search_by_opening_date(&self, from: &str, to: &str) -> ActionResult<Vec<Museum>> {
        let range = DateRange::parse(from, to)?;
        Ok(self.api.museums_between(range.from, range.to)?)
    }

    /// Room totals per museum, as served by the graph endpoint.
    pub fn room_counts(&self) -> ActionResult<Vec<RoomCount>> {
        Ok(self.api.museum_graph()?)
    }

    // -- rooms --------------------------------------------------------------

    /// All rooms, each labelled with its museum's name.
    pub fn list_rooms(&self) -> ActionResult<Vec<RoomRow>> {
        let (rooms, museums) = self.api.rooms_and_museums()?;
        Ok(join_museum_names(rooms, &museums))
    }

    pub fn room(&self, id: RoomId) -> ActionResult<Room> {
        Ok(self.api.get_room(id)?)
    }

    /// Create a room. The referenced museum must appear in the current
    /// museum listing.
    pub fn create_room(&self, form: &RoomForm) -> ActionResult<String> {
        let input = form.validate()?;
        self.ensure_museum_exists(input.museum_id)?;
        let message = self.api.create_room(&input)?;
        tracing::info!(name = %input.name, museum_id = input.museum_id, "room created");
        Ok(message.unwrap_or_else(|| ROOM_CREATED.to_string()))
    }

    pub fn edit_room(&self, id: RoomId, edit: RoomEdit) -> ActionResult<String> {
        let current = self.api.get_room(id)?;
        let mut form = RoomForm::from(&current);
        form.apply(edit);
        let input = form.validate()?;
        if input.museum_id != current.museum_id {
            self.ensure_museum_exists(input.museum_id)?;
        }
        let message = self.api.update_room(id, &input)?;
        tracing::info!(id, "room updated");
        Ok(message.unwrap_or_else(|| ROOM_UPDATED.to_string()))
    }

    /// Delete a room and reload the joined room listing.
    pub fn delete_room(&self, id: RoomId) -> ActionResult<Deleted<RoomRow>> {
        let message = self.api.delete_room(id)?;
        tracing::info!(id, "room deleted");
        Ok(Deleted {
            message: message.unwrap_or_else(|| ROOM_DELETED.to_string()),
            remaining: self.list_rooms()?,
        })
    }

    pub fn search_rooms_by_area(&self, min: &str, max: &str) -> ActionResult<Vec<RoomRow>> {
        let range = NumericRange::parse(min, max)?;
        let (rooms, museums) = self.api.rooms_by_area_and_museums(range.min, range.max)?;
        Ok(join_museum_names(rooms, &museums))
    }

    fn ensure_museum_exists(&self, id: MuseumId) -> ActionResult<()> {
        let museums = self.api.list_museums()?;
        if museums.iter().any(|m| m.museum_id == id) {
            Ok(())
        } else {
            Err(ActionError::UnknownMuseum(id))
        }
    }
}

/// Attach museum names to rooms through an id lookup table.
pub fn join_museum_names(rooms: Vec<Room>, museums: &[Museum]) -> Vec<RoomRow> {
    let names: HashMap<MuseumId, &str> = museums
        .iter()
        .map(|m| (m.museum_id, m.name.as_str()))
        .collect();

    rooms
        .into_iter()
        .map(|room| {
            let museum_name = names
                .get(&room.museum_id)
                .copied()
                .unwrap_or(UNKNOWN_MUSEUM)
                .to_string();
            RoomRow { room, museum_name }
        })
        .collect()
}
