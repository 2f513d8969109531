#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Layout engine for a printable weekly planner booklet.
//!
//! Calendar arithmetic, recurring templates and grid geometry feed a
//! composer that produces a [`compose::Document`]; a [`render::Surface`]
//! turns the document into output.

pub mod calendar;
pub mod compose;
pub mod config;
pub mod layout;
pub mod locale;
pub mod render;
pub mod schedule;
