use super::{Student, StudentRow};
use std::cmp::Ordering;

/// Students ordered by name.
///
/// Records live in an arena indexed by [`StudentRow`] (load order), which is
/// how the application matrix refers to them. A separate index keeps the rows
/// sorted by name and is what lookups and persistence walk through.
#[derive(Clone, Debug, Default)]
pub struct StudentStore {
    students: Vec<Student>,
    sorted: Vec<StudentRow>,
}

impl StudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store by inserting every student in turn.
    pub fn from_students<I: IntoIterator<Item = Student>>(students: I) -> Self {
        let mut store = Self::new();
        for student in students {
            store.insert(student);
        }
        store
    }

    /// Insert `student` after every student whose name is not greater, so that
    /// students sharing a name keep their arrival order. Returns the load-order
    /// row given to the student.
    pub fn insert(&mut self, student: Student) -> StudentRow {
        let row = StudentRow(self.students.len());
        let mut pos = self.sorted.len();
        self.sorted.push(row);
        while pos > 0 && self.students[self.sorted[pos - 1].0].name > student.name {
            self.sorted[pos] = self.sorted[pos - 1];
            pos -= 1;
        }
        self.sorted[pos] = row;
        self.students.push(student);
        row
    }

    /// Binary search by exact name. With duplicate names, any of them may be
    /// returned.
    pub fn find_by_name(&self, name: &str) -> Option<&Student> {
        self.position_of(name).map(|pos| self.sorted_at(pos))
    }

    /// Load-order row of a student with this exact name.
    pub fn row_of(&self, name: &str) -> Option<StudentRow> {
        self.position_of(name).map(|pos| self.sorted[pos])
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        let (mut low, mut high) = (0, self.sorted.len());
        while low < high {
            let mid = low + (high - low) / 2;
            match self.sorted_at(mid).name.as_str().cmp(name) {
                Ordering::Equal => return Some(mid),
                Ordering::Greater => high = mid,
                Ordering::Less => low = mid + 1,
            }
        }
        None
    }

    fn sorted_at(&self, pos: usize) -> &Student {
        &self.students[self.sorted[pos].0]
    }

    pub fn by_row(&self, StudentRow(row): StudentRow) -> Option<&Student> {
        self.students.get(row)
    }

    pub fn by_row_mut(&mut self, StudentRow(row): StudentRow) -> Option<&mut Student> {
        self.students.get_mut(row)
    }

    /// Students in name order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Student> {
        self.sorted.iter().map(|&StudentRow(row)| &self.students[row])
    }

    /// Students with their row, in load order.
    pub fn iter_rows(&self) -> impl Iterator<Item = (StudentRow, &Student)> {
        self.students
            .iter()
            .enumerate()
            .map(|(row, s)| (StudentRow(row), s))
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn student(id: i32, name: &str) -> Student {
        Student::new(id, name.into(), [0, 1, 2], 70)
    }

    fn names(store: &StudentStore) -> Vec<&str> {
        store.iter_sorted().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn stays_sorted_after_every_insert() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = StudentStore::new();
        for id in 0..200 {
            let name = (0..rng.random_range(0..6))
                .map(|_| rng.random_range(b'a'..=b'e') as char)
                .collect::<String>();
            store.insert(student(id, &name));
            let sorted = names(&store);
            assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn rows_follow_load_order() {
        let store = StudentStore::from_students(vec![
            student(1, "Zoe"),
            student(2, "Adam"),
            student(3, "Mia"),
        ]);
        assert_eq!(names(&store), vec!["Adam", "Mia", "Zoe"]);
        assert_eq!(store.by_row(StudentRow(0)).unwrap().id, 1);
        assert_eq!(store.by_row(StudentRow(1)).unwrap().id, 2);
        assert_eq!(store.by_row(StudentRow(2)).unwrap().id, 3);
        assert!(store.by_row(StudentRow(3)).is_none());
        assert_eq!(store.row_of("Mia"), Some(StudentRow(2)));
    }

    #[test]
    fn equal_names_keep_arrival_order() {
        let store = StudentStore::from_students(vec![
            student(1, "Bob"),
            student(2, "Al"),
            student(3, "Bob"),
            student(4, "Bob"),
        ]);
        let ids = store.iter_sorted().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn ordering_is_case_sensitive() {
        let store = StudentStore::from_students(vec![student(1, "alice"), student(2, "Bob")]);
        assert_eq!(names(&store), vec!["Bob", "alice"]);
        assert!(store.find_by_name("Alice").is_none());
    }

    #[test]
    fn finds_every_present_name() {
        let all = ["Hana", "Omar", "Li", "Ana", "Kofi", "Sven", "Ines", "Raj"];
        let store = StudentStore::from_students(
            all.iter()
                .zip(0..)
                .map(|(name, id)| student(id, name)),
        );
        for name in all {
            assert_eq!(store.find_by_name(name).unwrap().name, name);
        }
        for name in ["", "A", "Zed", "Kofii", "hana"] {
            assert!(store.find_by_name(name).is_none());
        }
    }

    #[test]
    fn single_and_empty_store() {
        assert!(StudentStore::new().find_by_name("x").is_none());
        let store = StudentStore::from_students(vec![student(9, "x")]);
        assert_eq!(store.find_by_name("x").unwrap().id, 9);
    }

    #[test]
    fn duplicate_names_return_some_match() {
        // Which duplicate is returned is unspecified.
        let store = StudentStore::from_students(vec![
            student(1, "Sam"),
            student(2, "Sam"),
            student(3, "Tom"),
        ]);
        let found = store.find_by_name("Sam").unwrap();
        assert!(found.id == 1 || found.id == 2);
    }
}
