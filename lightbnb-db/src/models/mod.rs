//! Domain models and validated input types

pub mod property;
pub mod reservation;
pub mod user;
pub mod validation;

pub use property::{NewProperty, Property, PropertyWithRating};
pub use reservation::ReservationWithProperty;
pub use user::{Email, NewUser, User};
pub use validation::ValidationError;

/// Maximum length for VARCHAR(255) columns
pub(crate) const MAX_VARCHAR_LEN: usize = 255;

/// Reject empty/blank or over-long text for a VARCHAR column.
pub(crate) fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_VARCHAR_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_VARCHAR_LEN,
        });
    }
    Ok(())
}
