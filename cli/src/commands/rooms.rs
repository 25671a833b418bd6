//! `museo rooms ...`

use std::io::Write;

use clap::{Args, Subcommand};
use museo_core::{Admin, RoomEdit, RoomForm, RoomId};
use tracing::debug;

use super::Output;
use crate::{render, Result};

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// List every room with its museum
    List,

    /// Show one room
    Show { id: RoomId },

    /// Create a room
    Create(RoomFields),

    /// Change some fields of a room
    Edit {
        id: RoomId,

        #[command(flatten)]
        fields: RoomFields,
    },

    /// Delete a room and list the ones left
    Delete { id: RoomId },

    /// Rooms whose area in square meters lies in [min, max]
    Area {
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,
    },
}

/// Room form fields as typed on the command line.
#[derive(Debug, Default, Args)]
pub struct RoomFields {
    /// Name, 3 to 100 characters
    #[arg(long)]
    pub name: Option<String>,

    /// Visitor capacity
    #[arg(long, allow_hyphen_values = true)]
    pub capacity: Option<String>,

    /// Area in square meters
    #[arg(long, allow_hyphen_values = true)]
    pub area: Option<String>,

    /// Whether the room is climate-controlled (yes/no)
    #[arg(long = "climatized")]
    pub is_climatized: Option<String>,

    /// Opening date (YYYY-MM-DD)
    #[arg(long)]
    pub opened: Option<String>,

    /// Id of the museum the room belongs to
    #[arg(long)]
    pub museum: Option<String>,
}

impl RoomFields {
    pub fn into_form(self) -> RoomForm {
        RoomForm {
            name: self.name.unwrap_or_default(),
            capacity: self.capacity.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            is_climatized: self.is_climatized,
            opening_date: self.opened.unwrap_or_default(),
            museum_id: self.museum.unwrap_or_default(),
        }
    }

    pub fn into_edit(self) -> RoomEdit {
        RoomEdit {
            name: self.name,
            capacity: self.capacity,
            area: self.area,
            is_climatized: self.is_climatized,
            opening_date: self.opened,
            museum_id: self.museum,
        }
    }
}

pub fn run<W: Write>(command: RoomCommand, admin: &Admin, out: &mut Output<W>) -> Result<()> {
    debug!(?command, "running room command");
    match command {
        RoomCommand::List => out.emit(&admin.list_rooms()?, |r| render::rooms(r)),
        RoomCommand::Show { id } => out.emit(&admin.room(id)?, render::room),
        RoomCommand::Create(fields) => out.message(&admin.create_room(&fields.into_form())?),
        RoomCommand::Edit { id, fields } => out.message(&admin.edit_room(id, fields.into_edit())?),
        RoomCommand::Delete { id } => out.emit(&admin.delete_room(id)?, |d| {
            format!("{}\n{}", d.message, render::rooms(&d.remaining))
        }),
        RoomCommand::Area { min, max } => {
            let found = admin.search_rooms_by_area(
                min.as_deref().unwrap_or_default(),
                max.as_deref().unwrap_or_default(),
            )?;
            out.emit(&found, |r| render::rooms(r))
        }
    }
}
