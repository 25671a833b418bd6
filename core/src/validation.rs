//! Client-side validation of form input and search ranges.
//!
//! Forms hold the raw text a user typed. `MuseumForm::validate` and
//! `RoomForm::validate` check every field, collect one error per offending
//! field, and only produce a typed payload when everything passes. Range
//! searches are validated the same way before any request is built.

use std::fmt;

use chrono::NaiveDate;

use crate::types::{Museum, MuseumId, NewMuseum, NewRoom, Room};

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 100;

/// Date format accepted by forms and searches.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    City,
    AnnualBudget,
    IsPublic,
    Capacity,
    Area,
    IsClimatized,
    OpeningDate,
    MuseumId,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::City => "city",
            Field::AnnualBudget => "annual_budget",
            Field::IsPublic => "is_public",
            Field::Capacity => "capacity",
            Field::Area => "area",
            Field::IsClimatized => "is_climatized",
            Field::OpeningDate => "opening_date",
            Field::MuseumId => "museum_id",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields: {}", join_fields(.errors))]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates field errors while a form is checked.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn check<T>(&mut self, field: Field, message: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.errors.push(FieldError { field, message });
        }
        value
    }

    /// Errors recorded so far; non-empty whenever some `check` saw `None`.
    fn into_errors(self) -> FormErrors {
        FormErrors {
            errors: self.errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn name_like(raw: &str) -> Option<String> {
    let len = raw.chars().count();
    (MIN_NAME_LEN..=MAX_NAME_LEN)
        .contains(&len)
        .then(|| raw.to_string())
}

fn number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn non_negative(raw: &str) -> Option<f64> {
    number(raw).filter(|n| *n >= 0.0)
}

fn positive(raw: &str) -> Option<f64> {
    number(raw).filter(|n| *n > 0.0)
}

fn positive_id(raw: &str) -> Option<MuseumId> {
    raw.trim().parse::<MuseumId>().ok().filter(|n| *n > 0)
}

/// Parse a yes/no choice. Accepts `true`/`false`, `yes`/`no`, `si`/`sí`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "si" | "sí" => Some(true),
        "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

// ---------------------------------------------------------------------------
// Museum form
// ---------------------------------------------------------------------------

/// Raw museum form input. `None` on a choice field means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MuseumForm {
    pub name: String,
    pub city: String,
    pub annual_budget: String,
    pub is_public: Option<String>,
    pub opening_date: String,
}

impl MuseumForm {
    pub fn validate(&self) -> Result<NewMuseum, FormErrors> {
        let mut c = Checker::default();
        let name = c.check(Field::Name, "Check the name format.", name_like(&self.name));
        let city = c.check(Field::City, "Check the city format.", name_like(&self.city));
        let annual_budget = c.check(
            Field::AnnualBudget,
            "Must be zero or a positive number.",
            non_negative(&self.annual_budget),
        );
        let is_public = c.check(
            Field::IsPublic,
            "Select whether the museum is public.",
            self.is_public.as_deref().and_then(parse_flag),
        );
        let opening_date = c.check(
            Field::OpeningDate,
            "The opening date is required.",
            parse_date(&self.opening_date),
        );
        match (name, city, annual_budget, is_public, opening_date) {
            (Some(name), Some(city), Some(annual_budget), Some(is_public), Some(opening_date)) => {
                Ok(NewMuseum {
                    name,
                    city,
                    annual_budget,
                    is_public,
                    opening_date,
                })
            }
            _ => Err(c.into_errors()),
        }
    }
}

impl From<&Museum> for MuseumForm {
    fn from(m: &Museum) -> Self {
        Self {
            name: m.name.clone(),
            city: m.city.clone(),
            annual_budget: m.annual_budget.to_string(),
            is_public: Some(m.is_public.to_string()),
            opening_date: m.opening_date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Changed fields for an edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MuseumEdit {
    pub name: Option<String>,
    pub city: Option<String>,
    pub annual_budget: Option<String>,
    pub is_public: Option<String>,
    pub opening_date: Option<String>,
}

impl MuseumForm {
    pub fn apply(&mut self, edit: MuseumEdit) {
        overlay(&mut self.name, edit.name);
        overlay(&mut self.city, edit.city);
        overlay(&mut self.annual_budget, edit.annual_budget);
        if edit.is_public.is_some() {
            self.is_public = edit.is_public;
        }
        overlay(&mut self.opening_date, edit.opening_date);
    }
}

fn overlay(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

// ---------------------------------------------------------------------------
// Room form
// ---------------------------------------------------------------------------

/// Raw room form input. `None` on a choice field means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomForm {
    pub name: String,
    pub capacity: String,
    pub area: String,
    pub is_climatized: Option<String>,
    pub opening_date: String,
    pub museum_id: String,
}

impl RoomForm {
    pub fn validate(&self) -> Result<NewRoom, FormErrors> {
        let mut c = Checker::default();
        let name = c.check(Field::Name, "Check the name format.", name_like(&self.name));
        let capacity = c.check(
            Field::Capacity,
            "Must be a positive number.",
            positive(&self.capacity),
        );
        let area = c.check(Field::Area, "Must be a positive number.", positive(&self.area));
        let is_climatized = c.check(
            Field::IsClimatized,
            "Select whether the room is climate-controlled.",
            self.is_climatized.as_deref().and_then(parse_flag),
        );
        let opening_date = c.check(
            Field::OpeningDate,
            "The opening date is required.",
            parse_date(&self.opening_date),
        );
        let museum_id = c.check(
            Field::MuseumId,
            "Select a valid museum.",
            positive_id(&self.museum_id),
        );
        match (name, capacity, area, is_climatized, opening_date, museum_id) {
            (
                Some(name),
                Some(capacity),
                Some(area),
                Some(is_climatized),
                Some(opening_date),
                Some(museum_id),
            ) => Ok(NewRoom {
                name,
                capacity,
                area,
                is_climatized,
                opening_date,
                museum_id,
            }),
            _ => Err(c.into_errors()),
        }
    }
}

impl From<&Room> for RoomForm {
    fn from(r: &Room) -> Self {
        Self {
            name: r.name.clone(),
            capacity: r.capacity.to_string(),
            area: r.area.to_string(),
            is_climatized: Some(r.is_climatized.to_string()),
            opening_date: r.opening_date.format(DATE_FORMAT).to_string(),
            museum_id: r.museum_id.to_string(),
        }
    }
}

/// Changed fields for an edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomEdit {
    pub name: Option<String>,
    pub capacity: Option<String>,
    pub area: Option<String>,
    pub is_climatized: Option<String>,
    pub opening_date: Option<String>,
    pub museum_id: Option<String>,
}

impl RoomForm {
    pub fn apply(&mut self, edit: RoomEdit) {
        overlay(&mut self.name, edit.name);
        overlay(&mut self.capacity, edit.capacity);
        overlay(&mut self.area, edit.area);
        if edit.is_climatized.is_some() {
            self.is_climatized = edit.is_climatized;
        }
        overlay(&mut self.opening_date, edit.opening_date);
        overlay(&mut self.museum_id, edit.museum_id);
    }
}

// ---------------------------------------------------------------------------
// Search ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("both minimum and maximum are required")]
    MissingBounds,

    #[error("minimum and maximum must be numbers")]
    NotANumber,

    #[error("minimum cannot exceed maximum")]
    Inverted,

    #[error("both start and end dates are required")]
    MissingDates,

    #[error("dates must use the YYYY-MM-DD format")]
    InvalidDate,

    #[error("start date cannot be after end date")]
    DatesInverted,
}

/// An inclusive numeric range (budget in euros, area in square meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn parse(min: &str, max: &str) -> Result<Self, RangeError> {
        if min.trim().is_empty() || max.trim().is_empty() {
            return Err(RangeError::MissingBounds);
        }
        let (Some(min), Some(max)) = (number(min), number(max)) else {
            return Err(RangeError::NotANumber);
        };
        if min > max {
            return Err(RangeError::Inverted);
        }
        Ok(Self { min, max })
    }
}

/// An inclusive range of opening dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn parse(from: &str, to: &str) -> Result<Self, RangeError> {
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(RangeError::MissingDates);
        }
        let (Some(from), Some(to)) = (parse_date(from), parse_date(to)) else {
            return Err(RangeError::InvalidDate);
        };
        if from > to {
            return Err(RangeError::DatesInverted);
        }
        Ok(Self { from, to })
    }
}
