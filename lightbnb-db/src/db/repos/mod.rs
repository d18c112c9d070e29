//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and issues one parameterized
//! statement per operation.

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;
