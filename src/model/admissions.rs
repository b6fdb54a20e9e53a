use super::*;
use crate::error::Result;

/// The whole dataset: students, universities and who applied where.
///
/// The matrix addresses students by load-order row, the store sorts them by
/// name; rows are resolved through the store's arena and never through sorted
/// position. Any of the three parts may be partially loaded.
#[derive(Clone, Debug)]
pub struct Admissions {
    pub store: StudentStore,
    pub universities: Vec<University>,
    pub applications: Applications,
}

impl Admissions {
    pub fn new(
        store: StudentStore,
        universities: Vec<University>,
        applications: Applications,
    ) -> Admissions {
        Admissions {
            store,
            universities,
            applications,
        }
    }

    pub fn student(&self, row: StudentRow) -> Option<&Student> {
        self.store.by_row(row)
    }

    pub fn university(&self, UniversityId(university): UniversityId) -> Option<&University> {
        self.universities.get(university)
    }

    /// Rows which have both a matrix row and a loaded student.
    pub fn all_students(&self) -> Vec<StudentRow> {
        self.applications
            .all_students()
            .filter(|&s| self.student(s).is_some())
            .collect()
    }

    pub fn all_universities(&self) -> Vec<UniversityId> {
        self.applications.all_universities().collect()
    }

    /// Students who applied to their first choice, in load order. A first
    /// choice outside the matrix counts as not applied.
    pub fn applied_to_first_choice(&self) -> Vec<StudentRow> {
        self.all_students()
            .into_iter()
            .filter(|&s| {
                self.student(s)
                    .and_then(|st| st.first_choice(self.applications.universities()))
                    .is_some_and(|u| self.applications.applied(s, u))
            })
            .collect()
    }

    /// Students who applied to `university`, in load order.
    pub fn students_for_university(&self, university: UniversityId) -> Result<Vec<StudentRow>> {
        Ok(self
            .applications
            .applicants_of(university)?
            .into_iter()
            .filter(|&s| self.student(s).is_some())
            .collect())
    }

    pub fn universities_for_student(&self, student: StudentRow) -> Result<Vec<UniversityId>> {
        self.applications.universities_for(student)
    }

    /// Rows of the students holding at least one scholarship.
    pub fn students_with_scholarship(&self) -> Vec<StudentRow> {
        self.store
            .iter_rows()
            .filter(|(_, s)| s.got_scholarship)
            .map(|(row, _)| row)
            .collect()
    }
}
