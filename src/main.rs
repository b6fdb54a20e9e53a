use crate::checks::*;
use crate::config::Config;
use crate::display::*;
use crate::loaders::Loader;
use crate::model::*;
use crate::scholarships::Scholarships;
use clap::Parser;
use eyre::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{Level, error, info, warn};

mod checks;
mod codec;
mod config;
mod display;
mod error;
mod loaders;
mod model;
mod scholarships;

const DEFAULT_CONFIG: &str = "unitrack.toml";

#[derive(Parser)]
#[command(version, about)]
struct Opt {
    /// Use FILE instead of unitrack.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for exam scores and scholarship amounts
    #[arg(short, long)]
    seed: Option<u64>,
    /// Show the student at this load-order row
    #[arg(long, value_name = "ROW")]
    student: Option<usize>,
    /// Show applicants of the university at this index
    #[arg(long, value_name = "INDEX")]
    university: Option<usize>,
    /// Search a student by exact name
    #[arg(long, value_name = "NAME")]
    search: Option<String>,
    /// Do not write the binary student file
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(opt: &Opt) -> Result<Config> {
    match &opt.config {
        Some(path) => Config::load(path),
        None if PathBuf::from(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG.as_ref()),
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    let level = match opt.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = load_config(&opt)?;
    let mut rng = match opt.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut admissions = Loader::new(&config, &mut rng).load_all();
    if admissions.store.is_empty() {
        warn!("No students loaded");
    }
    display_matrix(&admissions);
    display_counts(&admissions);
    check_first_choices(&admissions);
    display_first_choices(&admissions);
    if let Some(row) = opt.student {
        if let Err(e) = display_student(&admissions, StudentRow(row)) {
            println!("{e}");
        }
    }
    if let Some(index) = opt.university {
        if let Err(e) = display_university(&admissions, UniversityId(index)) {
            println!("{e}");
        }
    }

    let outcomes = Scholarships::new(&mut admissions, &config.scholarship, &mut rng).assign();
    info!(
        holders = admissions.students_with_scholarship().len(),
        "Scholarships assigned"
    );
    display_awards(&admissions, &outcomes);
    check_multiple_awards(&admissions, &outcomes);

    let output = &config.data.output;
    if opt.dry_run {
        info!(path = %output.display(), "Dry run, not saving student records");
    } else if let Err(e) = codec::save(&admissions.store, output) {
        error!(error = %e, "Skipping save");
    }
    match codec::load(output) {
        Ok(decoded) => {
            display_reloaded(&decoded);
            if decoded.is_complete() && !opt.dry_run {
                check_reload(&admissions.store, &decoded.students);
            }
        }
        Err(e) => error!(error = %e, "Skipping reload"),
    }

    if let Some(name) = &opt.search {
        display_search(&admissions, name);
    }
    Ok(())
}
