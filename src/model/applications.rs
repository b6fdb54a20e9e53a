use super::{StudentRow, UniversityId};
use crate::error::{Error, Result};
use pathfinding::matrix::Matrix;

/// Student × university application grid. Rows are students in load order,
/// columns are universities. The shape is fixed at construction.
#[derive(Clone, Debug)]
pub struct Applications {
    cells: Matrix<bool>,
}

impl Applications {
    /// Grid with every cell unset.
    pub fn new(students: usize, universities: usize) -> Self {
        Self {
            cells: Matrix::new(students, universities, false),
        }
    }

    pub fn students(&self) -> usize {
        self.cells.rows
    }

    pub fn universities(&self) -> usize {
        self.cells.columns
    }

    /// Record an application. Cells outside the grid are ignored.
    pub fn set(&mut self, StudentRow(s): StudentRow, UniversityId(u): UniversityId, applied: bool) {
        if let Some(cell) = self.cells.get_mut((s, u)) {
            *cell = applied;
        }
    }

    pub fn applied(&self, StudentRow(s): StudentRow, UniversityId(u): UniversityId) -> bool {
        self.cells.get((s, u)).copied().unwrap_or(false)
    }

    pub fn all_students(&self) -> impl Iterator<Item = StudentRow> {
        (0..self.students()).map(StudentRow)
    }

    pub fn all_universities(&self) -> impl Iterator<Item = UniversityId> {
        (0..self.universities()).map(UniversityId)
    }

    /// Number of applicants of every university.
    pub fn applications_per_university(&self) -> Vec<usize> {
        self.all_universities()
            .map(|u| self.all_students().filter(|&s| self.applied(s, u)).count())
            .collect()
    }

    /// Number of applications of every student row.
    pub fn applications_per_student(&self) -> Vec<usize> {
        self.all_students()
            .map(|s| self.all_universities().filter(|&u| self.applied(s, u)).count())
            .collect()
    }

    /// Rows of the students who applied to `university`.
    pub fn applicants_of(&self, university: UniversityId) -> Result<Vec<StudentRow>> {
        self.check_university(university)?;
        Ok(self
            .all_students()
            .filter(|&s| self.applied(s, university))
            .collect())
    }

    /// Universities the student at `student` applied to.
    pub fn universities_for(&self, student: StudentRow) -> Result<Vec<UniversityId>> {
        self.check_student(student)?;
        Ok(self
            .all_universities()
            .filter(|&u| self.applied(student, u))
            .collect())
    }

    pub fn check_student(&self, StudentRow(index): StudentRow) -> Result<()> {
        if index < self.students() {
            Ok(())
        } else {
            Err(Error::InvalidIndex {
                what: "student",
                index,
                len: self.students(),
            })
        }
    }

    pub fn check_university(&self, UniversityId(index): UniversityId) -> Result<()> {
        if index < self.universities() {
            Ok(())
        } else {
            Err(Error::InvalidIndex {
                what: "university",
                index,
                len: self.universities(),
            })
        }
    }
}

#[cfg(test)]
impl Applications {
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut applications = Self::new(rows.len(), columns);
        for (s, row) in rows.iter().enumerate() {
            for (u, &applied) in row.as_ref().iter().enumerate().take(columns) {
                applications.set(StudentRow(s), UniversityId(u), applied);
            }
        }
        applications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Applications {
        Applications::from_rows(&[[true, false], [true, true], [false, true]])
    }

    #[test]
    fn counts() {
        let a = sample();
        assert_eq!(a.applications_per_university(), vec![2, 2]);
        assert_eq!(a.applications_per_student(), vec![1, 2, 1]);
    }

    #[test]
    fn shape_is_fixed() {
        let mut a = Applications::new(2, 3);
        a.set(StudentRow(5), UniversityId(0), true);
        a.set(StudentRow(0), UniversityId(3), true);
        assert_eq!((a.students(), a.universities()), (2, 3));
        assert_eq!(a.applications_per_student(), vec![0, 0]);
        assert!(!a.applied(StudentRow(5), UniversityId(0)));
    }

    #[test]
    fn applicants() {
        let a = sample();
        assert_eq!(
            a.applicants_of(UniversityId(1)).unwrap(),
            vec![StudentRow(1), StudentRow(2)]
        );
    }

    #[test]
    fn applicants_of_column_count_is_invalid() {
        let a = sample();
        assert!(matches!(
            a.applicants_of(UniversityId(2)),
            Err(Error::InvalidIndex {
                what: "university",
                index: 2,
                len: 2
            })
        ));
    }

    #[test]
    fn universities_of_student() {
        let a = sample();
        assert_eq!(
            a.universities_for(StudentRow(1)).unwrap(),
            vec![UniversityId(0), UniversityId(1)]
        );
        assert!(a.universities_for(StudentRow(0)).unwrap() == vec![UniversityId(0)]);
        assert!(matches!(
            a.universities_for(StudentRow(3)),
            Err(Error::InvalidIndex { what: "student", .. })
        ));
    }

    #[test]
    fn empty_grid() {
        let a = Applications::new(0, 0);
        assert!(a.applications_per_university().is_empty());
        assert!(a.applications_per_student().is_empty());
        assert!(a.applicants_of(UniversityId(0)).is_err());
    }
}
