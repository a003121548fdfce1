//! Core engine for daybook.
//!
//! This crate provides everything the front ends build on:
//! - `grid` for month and week date matrices
//! - `store` for the date-keyed event store and day selection
//! - `layout` for turning a day's events into timeline columns
//! - `validate` for the checks a form runs before touching the store

pub mod config;
pub mod date_key;
pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod sample;
pub mod store;
pub mod time_of_day;
pub mod validate;

pub use date_key::DateKey;
pub use error::{DaybookError, DaybookResult};
pub use event::{Event, EventId, EventPatch, Label};
pub use store::{CalendarStore, EventsByDate};
