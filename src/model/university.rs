use std::fmt;

/// Dense university index, equal to its column in the application matrix.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UniversityId(pub usize);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub location: String,
    /// Informational only: awards never check it.
    pub available_seats: i32,
}

impl fmt::Display for University {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
