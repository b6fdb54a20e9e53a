use eyre::{Result, WrapErr, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub seed: Option<u64>,
    pub data: DataConfig,
    pub dimensions: DimensionsConfig,
    pub exam: ExamConfig,
    pub scholarship: ScholarshipConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub students: PathBuf,
    pub universities: PathBuf,
    pub applications: PathBuf,
    pub output: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            students: "students.txt".into(),
            universities: "universities.txt".into(),
            applications: "applications.txt".into(),
            output: "final_students.bin".into(),
        }
    }
}

/// Shape of the application matrix.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionsConfig {
    pub students: usize,
    pub universities: usize,
}

impl Default for DimensionsConfig {
    fn default() -> Self {
        Self {
            students: 10,
            universities: 5,
        }
    }
}

/// Range of the generated exam scores.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExamConfig {
    pub min_score: i32,
    pub max_score: i32,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            min_score: 50,
            max_score: 100,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScholarshipConfig {
    /// Lowest exam score eligible for a scholarship.
    pub min_score: i32,
    pub min_amount: u32,
    pub max_amount: u32,
}

impl Default for ScholarshipConfig {
    fn default() -> Self {
        Self {
            min_score: 85,
            min_amount: 3000,
            max_amount: 5000,
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Self::parse(&contents)
            .wrap_err_with(|| format!("invalid configuration file {}", file_name.display()))
    }

    pub fn parse(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        ensure!(
            self.exam.min_score <= self.exam.max_score,
            "exam score range {}..={} is empty",
            self.exam.min_score,
            self.exam.max_score
        );
        ensure!(
            self.scholarship.min_amount <= self.scholarship.max_amount,
            "scholarship amount range {}..={} is empty",
            self.scholarship.min_amount,
            self.scholarship.max_amount
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.dimensions.students, 10);
        assert_eq!(config.dimensions.universities, 5);
        assert_eq!(config.scholarship.min_score, 85);
        assert_eq!(config.data.output, PathBuf::from("final_students.bin"));
    }

    #[test]
    fn partial_sections() {
        let config = Config::parse(
            "seed = 3\n[dimensions]\nstudents = 4\n[scholarship]\nmax_amount = 4000\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.dimensions.students, 4);
        assert_eq!(config.dimensions.universities, 5);
        assert_eq!(config.scholarship.min_amount, 3000);
        assert_eq!(config.scholarship.max_amount, 4000);
    }

    #[test]
    fn rejects_inverted_ranges() {
        assert!(Config::parse("[exam]\nmin_score = 90\nmax_score = 10\n").is_err());
        assert!(Config::parse("[scholarship]\nmin_amount = 9000\n").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::parse("[dimensions]\nseats = 3\n").is_err());
    }

    #[test]
    fn missing_file() {
        assert!(Config::load(Path::new("/nonexistent/unitrack.toml")).is_err());
    }
}
