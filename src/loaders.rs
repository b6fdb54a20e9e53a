use crate::config::{Config, ExamConfig};
use crate::error::{Error, Result};
use crate::model::{
    Admissions, Applications, PREFERENCES, Student, StudentRow, StudentStore, University,
    UniversityId,
};
use rand::Rng;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{error, info, instrument, trace, warn};

#[derive(Debug, Deserialize)]
struct StudentRecord {
    id: i32,
    name: String,
    first: i32,
    second: i32,
    third: i32,
}

impl StudentRecord {
    fn preferences(&self) -> [i32; PREFERENCES] {
        [self.first, self.second, self.third]
    }
}

#[derive(Debug, Deserialize)]
struct UniversityRecord {
    id: i32,
    name: String,
    location: String,
    seats: i32,
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io_unavailable(path, e))
}

/// Deserialize whitespace separated records, one per line, stopping at the
/// first malformed line or once `limit` records have been read.
fn records<T: DeserializeOwned>(path: &Path, source: &str, limit: usize) -> Vec<T> {
    let normalized = source
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(normalized.as_bytes());
    let mut records = Vec::new();
    for record in reader.deserialize() {
        if records.len() == limit {
            warn!(path = %path.display(), limit, "Ignoring records beyond capacity");
            break;
        }
        match record {
            Ok(record) => records.push(record),
            Err(source) => {
                let error = Error::Parse {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(%error, records = records.len(), "Stopped reading at malformed line");
                break;
            }
        }
    }
    records
}

/// Reads the three text sources of a dataset.
pub struct Loader<'a, R> {
    config: &'a Config,
    rng: R,
}

impl<'a, R: Rng> Loader<'a, R> {
    pub fn new(config: &'a Config, rng: R) -> Self {
        Self { config, rng }
    }

    /// Load the three configured sources. A source which cannot be read is
    /// reported and replaced by an empty one, the matrix keeping its
    /// configured shape.
    pub fn load_all(&mut self) -> Admissions {
        let config = self.config;
        let data = &config.data;
        let store = self.load_students(&data.students).unwrap_or_else(|e| {
            error!(error = %e, "Skipping students");
            StudentStore::new()
        });
        let universities = self
            .load_universities(&data.universities)
            .unwrap_or_else(|e| {
                error!(error = %e, "Skipping universities");
                Vec::new()
            });
        let applications = self
            .load_applications(&data.applications)
            .unwrap_or_else(|e| {
                error!(error = %e, "Skipping applications");
                self.empty_applications()
            });
        Admissions::new(store, universities, applications)
    }

    /// Load students into a name ordered store, drawing each exam score.
    #[instrument(skip(self))]
    pub fn load_students(&mut self, path: &Path) -> Result<StudentStore> {
        let source = read_source(path)?;
        Ok(self.parse_students(path, &source))
    }

    fn parse_students(&mut self, path: &Path, source: &str) -> StudentStore {
        let ExamConfig {
            min_score,
            max_score,
        } = self.config.exam;
        let mut store = StudentStore::new();
        for record in records::<StudentRecord>(path, source, self.config.dimensions.students) {
            let score = self.rng.random_range(min_score..=max_score);
            let preferences = record.preferences();
            let student = Student::new(record.id, record.name, preferences, score);
            trace!(%student, score, "Loaded student");
            store.insert(student);
        }
        info!(students = store.len(), "Loaded students");
        store
    }

    #[instrument(skip(self))]
    pub fn load_universities(&self, path: &Path) -> Result<Vec<University>> {
        let source = read_source(path)?;
        Ok(self.parse_universities(path, &source))
    }

    fn parse_universities(&self, path: &Path, source: &str) -> Vec<University> {
        let universities = records::<UniversityRecord>(
            path,
            source,
            self.config.dimensions.universities,
        )
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if usize::try_from(record.id).ok() != Some(index) {
                warn!(
                    id = record.id,
                    column = index,
                    "University identifier does not match its position"
                );
            }
            University {
                id: UniversityId(index),
                name: record.name,
                location: record.location,
                available_seats: record.seats,
            }
        })
        .collect::<Vec<_>>();
        info!(universities = universities.len(), "Loaded universities");
        universities
    }

    #[instrument(skip(self))]
    pub fn load_applications(&self, path: &Path) -> Result<Applications> {
        let source = read_source(path)?;
        Ok(self.parse_applications(&source))
    }

    /// Fill the matrix in row-major order. Cells after the first missing or
    /// non-numeric value stay unset.
    fn parse_applications(&self, source: &str) -> Applications {
        let (students, universities) = (
            self.config.dimensions.students,
            self.config.dimensions.universities,
        );
        let mut applications = Applications::new(students, universities);
        let mut values = source.split_whitespace().map(str::parse::<i32>);
        let mut rows = 0;
        'rows: for s in 0..students {
            for u in 0..universities {
                match values.next() {
                    Some(Ok(value)) => {
                        applications.set(StudentRow(s), UniversityId(u), value == 1)
                    }
                    _ => break 'rows,
                }
            }
            rows += 1;
        }
        if rows < students {
            warn!(rows, expected = students, "Application source is short");
        }
        info!(rows, "Loaded application rows");
        applications
    }

    /// Empty matrix of the configured shape, used when the source is missing.
    fn empty_applications(&self) -> Applications {
        Applications::new(
            self.config.dimensions.students,
            self.config.dimensions.universities,
        )
    }
}
