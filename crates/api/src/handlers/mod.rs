pub mod auth;
pub mod catalog;
pub mod character;
pub mod image;
pub mod quest;
