//! Database repositories.

pub mod products;
pub mod repository;
pub mod users;

pub use products::Products;
pub use repository::Repository;
pub use users::Users;
