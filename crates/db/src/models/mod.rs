//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the create/update DTOs its repository accepts.

pub mod catalog;
pub mod character;
pub mod image;
pub mod quest;
pub mod user;
