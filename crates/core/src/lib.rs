//! Domain rules for the dungeon service.
//!
//! Everything in this crate is free of database and HTTP concerns so the
//! ownership, lifecycle, and validation rules can be exercised in isolation.

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod naming;
pub mod ownership;
pub mod roles;
pub mod storage;
pub mod types;
pub mod validation;
