use crate::model::{Admissions, Student, StudentRow, StudentStore};
use crate::scholarships::Outcome;
use std::collections::BTreeMap;
use tracing::warn;

/// Warn about students whose first choice names no university. They count as
/// not having applied to it.
pub fn check_first_choices(a: &Admissions) -> Vec<StudentRow> {
    let universities = a.applications.universities();
    let rows = a
        .all_students()
        .into_iter()
        .filter(|&s| {
            a.student(s)
                .is_some_and(|st| st.first_choice(universities).is_none())
        })
        .collect::<Vec<_>>();
    for &s in &rows {
        if let Some(st) = a.student(s) {
            warn!(
                student = %st,
                first_choice = st.preferences[0],
                universities,
                "First choice is not a known university"
            );
        }
    }
    rows
}

/// Warn about students who won at more than one university. Returns them with
/// their number of awards.
pub fn check_multiple_awards(a: &Admissions, outcomes: &[Outcome]) -> Vec<(StudentRow, usize)> {
    let mut wins = BTreeMap::new();
    for award in outcomes.iter().filter_map(|o| o.award) {
        *wins.entry(award.student).or_insert(0) += 1;
    }
    let repeated = wins
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .collect::<Vec<_>>();
    for &(s, n) in &repeated {
        if let Some(st) = a.student(s) {
            warn!(student = %st, awards = n, "Student won several scholarships");
        }
    }
    repeated
}

/// Compare the reloaded records with the store they were saved from. Records
/// are written in name order, so they are compared position by position; a
/// saved name absent from the reloaded records is reported as well. Returns
/// the names which could not be found identical.
pub fn check_reload(saved: &StudentStore, reloaded: &[Student]) -> Vec<String> {
    if reloaded.len() != saved.len() {
        warn!(
            saved = saved.len(),
            reloaded = reloaded.len(),
            "Reloaded record count differs"
        );
    }
    let lookup = StudentStore::from_students(reloaded.iter().cloned());
    let mut mismatches = Vec::new();
    for (pos, s) in saved.iter_sorted().enumerate() {
        if lookup.find_by_name(&s.name).is_none() {
            warn!(student = %s, "Saved student missing from reloaded records");
        } else if reloaded.get(pos) != Some(s) {
            warn!(student = %s, position = pos, "Reloaded record differs from saved one");
        } else {
            continue;
        }
        if !mismatches.contains(&s.name) {
            mismatches.push(s.name.clone());
        }
    }
    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Applications, UniversityId};
    use crate::scholarships::Award;

    fn store() -> StudentStore {
        StudentStore::from_students(vec![
            Student::new(1, "Lea".into(), [0, 1, 2], 90),
            Student::new(2, "Ben".into(), [9, 1, 2], 70),
        ])
    }

    #[test]
    fn out_of_range_first_choices() {
        let a = Admissions::new(store(), Vec::new(), Applications::new(2, 3));
        assert_eq!(check_first_choices(&a), vec![StudentRow(1)]);
    }

    #[test]
    fn repeated_winners() {
        let a = Admissions::new(store(), Vec::new(), Applications::new(2, 3));
        let award = |s| {
            Some(Award {
                student: StudentRow(s),
                score: 90,
                amount: 3000,
            })
        };
        let outcomes = [
            Outcome {
                university: UniversityId(0),
                award: award(0),
            },
            Outcome {
                university: UniversityId(1),
                award: None,
            },
            Outcome {
                university: UniversityId(2),
                award: award(0),
            },
        ];
        assert_eq!(check_multiple_awards(&a, &outcomes), vec![(StudentRow(0), 2)]);
    }

    #[test]
    fn reload_matches() {
        let saved = store();
        let reloaded = saved.iter_sorted().cloned().collect::<Vec<_>>();
        assert!(check_reload(&saved, &reloaded).is_empty());
    }

    #[test]
    fn reload_detects_changes() {
        let saved = store();
        let mut reloaded = saved.iter_sorted().cloned().collect::<Vec<_>>();
        reloaded[0].got_scholarship = true;
        reloaded.pop();
        assert_eq!(check_reload(&saved, &reloaded), vec!["Ben", "Lea"]);
    }

    #[test]
    fn reload_with_shared_names() {
        let saved = StudentStore::from_students(vec![
            Student::new(1, "Sam".into(), [0, 1, 2], 91),
            Student::new(2, "Sam".into(), [2, 1, 0], 64),
            Student::new(3, "Tom".into(), [1, 0, 2], 77),
        ]);
        let reloaded = saved.iter_sorted().cloned().collect::<Vec<_>>();
        assert!(check_reload(&saved, &reloaded).is_empty());

        let mut changed = reloaded.clone();
        changed[0].exam_score = 92;
        assert_eq!(check_reload(&saved, &changed), vec!["Sam"]);
    }
}
