//! Serde helpers shared by the record types

pub mod datetime;
pub mod patch;
