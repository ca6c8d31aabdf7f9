//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod catalog_repo;
pub mod character_repo;
pub mod image_repo;
pub mod quest_repo;
pub mod user_repo;

pub use catalog_repo::CatalogRepo;
pub use character_repo::CharacterRepo;
pub use image_repo::ImageRepo;
pub use quest_repo::QuestRepo;
pub use user_repo::UserRepo;
