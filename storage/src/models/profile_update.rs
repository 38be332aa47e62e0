//! One-field profile mutation.
//!
//! Carries the new value for exactly one column; used by
//! ProfileRepository::update_field. Each update flow turn commits one field.

/// A single-field update applied to an existing profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Age(i64),
    School(String),
    Preferences(String),
    Bio(String),
}

impl ProfileUpdate {
    /// Column the update writes to.
    pub fn column(&self) -> &'static str {
        match self {
            ProfileUpdate::FirstName(_) => "first_name",
            ProfileUpdate::LastName(_) => "last_name",
            ProfileUpdate::Email(_) => "email",
            ProfileUpdate::Age(_) => "age",
            ProfileUpdate::School(_) => "school",
            ProfileUpdate::Preferences(_) => "preferences",
            ProfileUpdate::Bio(_) => "bio",
        }
    }
}
