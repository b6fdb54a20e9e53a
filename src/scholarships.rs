use crate::config::ScholarshipConfig;
use crate::model::*;
use rand::Rng;
use tracing::{debug, instrument, trace};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Award {
    pub student: StudentRow,
    pub score: i32,
    /// Informational only, never persisted.
    pub amount: u32,
}

/// Result of the selection for one university.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub university: UniversityId,
    pub award: Option<Award>,
}

pub struct Scholarships<'a, R> {
    admissions: &'a mut Admissions,
    config: &'a ScholarshipConfig,
    rng: R,
}

impl<'a, R: Rng> Scholarships<'a, R> {
    pub fn new(admissions: &'a mut Admissions, config: &'a ScholarshipConfig, rng: R) -> Self {
        Scholarships {
            admissions,
            config,
            rng,
        }
    }

    /// Best eligible applicant of `university`: highest score at or above the
    /// threshold, the lowest row winning ties.
    pub fn top_candidate(&self, university: UniversityId) -> Option<(StudentRow, i32)> {
        let mut best: Option<(StudentRow, i32)> = None;
        for s in self.admissions.all_students() {
            if !self.admissions.applications.applied(s, university) {
                continue;
            }
            let Some(score) = self.admissions.student(s).map(|st| st.exam_score) else {
                continue;
            };
            if score >= self.config.min_score && best.is_none_or(|(_, top)| score > top) {
                best = Some((s, score));
            }
        }
        best
    }

    /// Award one scholarship per university to its top candidate. Universities
    /// are handled independently, so the same student may win several times.
    #[instrument(skip_all)]
    pub fn assign(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        for university in self.admissions.all_universities() {
            let award = self.top_candidate(university).map(|(student, score)| {
                let amount = self
                    .rng
                    .random_range(self.config.min_amount..=self.config.max_amount);
                if let Some(st) = self.admissions.store.by_row_mut(student) {
                    st.got_scholarship = true;
                    trace!(
                        university = university.0,
                        student = %st,
                        score,
                        amount,
                        "Awarding scholarship"
                    );
                }
                Award {
                    student,
                    score,
                    amount,
                }
            });
            if award.is_none() {
                debug!(university = university.0, "No eligible applicant");
            }
            outcomes.push(Outcome { university, award });
        }
        outcomes
    }
}
