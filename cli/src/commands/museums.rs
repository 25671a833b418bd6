//! `museo museums ...`

use std::io::Write;

use clap::{Args, Subcommand};
use museo_core::{Admin, MuseumEdit, MuseumForm, MuseumId};
use tracing::debug;

use super::Output;
use crate::{render, Result};

#[derive(Debug, Subcommand)]
pub enum MuseumCommand {
    /// List every museum
    List,

    /// Show one museum
    Show { id: MuseumId },

    /// Create a museum
    Create(MuseumFields),

    /// Change some fields of a museum
    Edit {
        id: MuseumId,

        #[command(flatten)]
        fields: MuseumFields,
    },

    /// Delete a museum and list the ones left
    Delete { id: MuseumId },

    /// Museums whose annual budget lies in [min, max]
    Budget {
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,
    },

    /// Museums opened between two dates (YYYY-MM-DD), inclusive
    Between {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Bar chart of rooms per museum
    Graph,
}

/// Museum form fields as typed on the command line.
#[derive(Debug, Default, Args)]
pub struct MuseumFields {
    /// Name, 3 to 100 characters
    #[arg(long)]
    pub name: Option<String>,

    /// City, 3 to 100 characters
    #[arg(long)]
    pub city: Option<String>,

    /// Annual budget in euros
    #[arg(long, allow_hyphen_values = true)]
    pub budget: Option<String>,

    /// Whether the museum is public (yes/no)
    #[arg(long = "public")]
    pub is_public: Option<String>,

    /// Opening date (YYYY-MM-DD)
    #[arg(long)]
    pub opened: Option<String>,
}

impl MuseumFields {
    pub fn into_form(self) -> MuseumForm {
        MuseumForm {
            name: self.name.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            annual_budget: self.budget.unwrap_or_default(),
            is_public: self.is_public,
            opening_date: self.opened.unwrap_or_default(),
        }
    }

    pub fn into_edit(self) -> MuseumEdit {
        MuseumEdit {
            name: self.name,
            city: self.city,
            annual_budget: self.budget,
            is_public: self.is_public,
            opening_date: self.opened,
        }
    }
}

pub fn run<W: Write>(command: MuseumCommand, admin: &Admin, out: &mut Output<W>) -> Result<()> {
    debug!(?command, "running museum command");
    match command {
        MuseumCommand::List => out.emit(&admin.list_museums()?, |m| render::museums(m)),
        MuseumCommand::Show { id } => out.emit(&admin.museum(id)?, render::museum),
        MuseumCommand::Create(fields) => out.message(&admin.create_museum(&fields.into_form())?),
        MuseumCommand::Edit { id, fields } => {
            out.message(&admin.edit_museum(id, fields.into_edit())?)
        }
        MuseumCommand::Delete { id } => out.emit(&admin.delete_museum(id)?, |d| {
            format!("{}\n{}", d.message, render::museums(&d.remaining))
        }),
        MuseumCommand::Budget { min, max } => {
            let found = admin.search_by_budget(
                min.as_deref().unwrap_or_default(),
                max.as_deref().unwrap_or_default(),
            )?;
            out.emit(&found, |m| render::museums(m))
        }
        MuseumCommand::Between { from, to } => {
            let found = admin.search_by_opening_date(
                from.as_deref().unwrap_or_default(),
                to.as_deref().unwrap_or_default(),
            )?;
            out.emit(&found, |m| render::museums(m))
        }
        MuseumCommand::Graph => out.emit(&admin.room_counts()?, |c| render::graph(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flags_become_empty_form_fields() {
        let form = MuseumFields {
            name: Some("Museo Sorolla".to_string()),
            ..MuseumFields::default()
        }
        .into_form();
        assert_eq!(form.name, "Museo Sorolla");
        assert_eq!(form.city, "");
        assert_eq!(form.is_public, None);
    }

    #[test]
    fn edit_keeps_only_given_flags() {
        let edit = MuseumFields {
            budget: Some("0".to_string()),
            ..MuseumFields::default()
        }
        .into_edit();
        assert_eq!(
            edit,
            MuseumEdit {
                annual_budget: Some("0".to_string()),
                ..MuseumEdit::default()
            }
        );
    }
}
