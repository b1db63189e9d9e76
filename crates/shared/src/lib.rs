//! Domain model, error taxonomy and sample data shared by the panel core and its drivers.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod protocol;
