//! ciqgen core - CIQ workbook parsing and vendor script generation
//!
//! This crate contains the domain logic of the toolset: loading planning
//! workbooks, converting coordinates, and generating migration scripts, MO
//! commands, and XML configuration bundles.

pub mod bundle;
pub mod config;
pub mod coord;
pub mod error;
pub mod listing;
pub mod mapping;
pub mod ratprio;
pub mod scripts;
pub mod template;
pub mod workbook;

pub use error::{CiqgenError, Result};
