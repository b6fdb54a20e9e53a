use super::UniversityId;
use std::fmt;

/// Number of ranked preferences every student gives.
pub const PREFERENCES: usize = 3;

/// Position of a student in load order. This is also the row of the
/// student in the application matrix, and never changes once assigned.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentRow(pub usize);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub preferences: [i32; PREFERENCES],
    pub exam_score: i32,
    pub got_scholarship: bool,
}

impl Student {
    pub fn new(id: i32, name: String, preferences: [i32; PREFERENCES], exam_score: i32) -> Self {
        Self {
            id,
            name,
            preferences,
            exam_score,
            got_scholarship: false,
        }
    }

    /// First choice, if it designates one of the `universities` columns.
    pub fn first_choice(&self, universities: usize) -> Option<UniversityId> {
        usize::try_from(self.preferences[0])
            .ok()
            .filter(|&u| u < universities)
            .map(UniversityId)
    }

    pub fn rank_of(&self, university: UniversityId) -> Option<usize> {
        self.preferences
            .iter()
            .position(|&p| usize::try_from(p).ok() == Some(university.0))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
