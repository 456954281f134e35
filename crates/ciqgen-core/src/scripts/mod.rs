//! Script and command generators
//!
//! Each generator is a pure function from rows (plus templates or options)
//! to text; artifact naming and packaging live in [`crate::bundle`].

pub mod g2l;
pub mod polygon;
pub mod prepost;
pub mod xml;
