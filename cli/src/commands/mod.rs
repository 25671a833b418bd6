//! CLI command implementations
//!
//! Each submodule handles one resource. Commands write through `Output`,
//! which chooses between the text renderers and JSON.

pub mod museums;
pub mod rooms;

use std::io::Write;

use serde::Serialize;

use crate::Result;

/// Destination for command results.
pub struct Output<W> {
    out: W,
    json: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
}

impl<W: Write> Output<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    /// Print `value` as pretty JSON, or through `text` otherwise.
    pub fn emit<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> Result<()> {
        let rendered = if self.json {
            serde_json::to_string_pretty(value)?
        } else {
            text(value)
        };
        writeln!(self.out, "{rendered}")?;
        Ok(())
    }

    /// Print a confirmation message.
    pub fn message(&mut self, message: &str) -> Result<()> {
        self.emit(&Message { message }, |m| m.message.to_string())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
