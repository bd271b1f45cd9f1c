//! User aggregate
//!
//! Contains the User entity, the creation DTO, and the credential lookup interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::User;

pub use dto_create::CreateUserDto;

pub use repository::UserRepository;
