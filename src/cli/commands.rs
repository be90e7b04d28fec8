//! Command implementations

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::args::{Args, Commands};
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::parallel::process_with_errors;
use crate::core::{find_environments, find_importers, DependencyMaterializer, FileHashCache, Fingerprinter};
use crate::error::{DepsError, Result};
use crate::models::config::Settings;
use crate::models::report::{FingerprintEntry, Report};
use crate::output::{create_formatter, OutputWriter, StdoutWriter};
use crate::utils::fs;
use crate::utils::path_resolver::{EnvironmentLocator, ProjectLocator};

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the requested operation failed
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for invalid configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Available commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the transitive imports of an environment
    Imports(PathBuf),
    /// Fingerprint snippet files
    Fingerprint(Vec<PathBuf>),
    /// Find the environments importing any of the files
    Importers { files: Vec<PathBuf>, root: PathBuf },
    /// List the environments below a directory
    Environments(PathBuf),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        match &args.command {
            Commands::Imports { dir } => Command::Imports(dir.clone()),
            Commands::Fingerprint { files } => Command::Fingerprint(files.clone()),
            Commands::Importers { files, root } => Command::Importers {
                files: files.clone(),
                root: root.clone(),
            },
            Commands::Environments { dir } => Command::Environments(dir.clone()),
            Commands::Init => Command::Init,
        }
    }

    /// Whether the command needs the layered configuration
    pub fn needs_settings(&self) -> bool {
        !matches!(self, Command::Init)
    }

    /// Execute the command, returning the report to print, if any
    pub fn execute(&self, settings: &Settings) -> Result<Option<Report>> {
        match self {
            Command::Imports(dir) => imports(dir, settings).map(Some),
            Command::Fingerprint(files) => fingerprints(files, settings).map(Some),
            Command::Importers { files, root } => importers(files, root, settings).map(Some),
            Command::Environments(dir) => environments(dir, settings).map(Some),
            Command::Init => {
                init(Path::new(DEFAULT_CONFIG_FILE))?;
                Ok(None)
            }
        }
    }
}

fn imports(dir: &Path, settings: &Settings) -> Result<Report> {
    let materializer = DependencyMaterializer::new(ProjectLocator::from_settings(settings));
    let closure = materializer.closure(dir)?;
    let files = closure.relative_paths();
    Ok(Report::Imports {
        root_dir: closure.environment.root_dir,
        entrypoint: closure.environment.entrypoint,
        files,
    })
}

fn fingerprints(files: &[PathBuf], settings: &Settings) -> Result<Report> {
    let locator = ProjectLocator::from_settings(settings);
    let cache = Arc::new(FileHashCache::new());

    let fingerprints = process_with_errors(files.to_vec(), settings.parallel, |file: PathBuf| {
        if !file.is_file() {
            return Err(DepsError::read_error(
                &file,
                io::Error::new(io::ErrorKind::NotFound, "not a file"),
            ));
        }
        // Each file resolves imports along the search paths of its own environment
        let environment = locator.locate(&file)?;
        let fingerprinter = Fingerprinter::for_environment(&environment, Arc::clone(&cache));
        let fingerprint = fingerprinter.fingerprint_file(&file)?;
        Ok(FingerprintEntry {
            path: fs::to_slash(&file),
            fingerprint: fingerprint.to_string(),
        })
    })?;

    let stats = cache.stats();
    debug!(
        entries = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        "digest cache"
    );

    Ok(Report::Fingerprints { fingerprints })
}

fn importers(files: &[PathBuf], root: &Path, settings: &Settings) -> Result<Report> {
    let importers = find_importers(root, files, settings)?;
    Ok(Report::Importers {
        files: files.iter().map(|f| fs::to_slash(f)).collect(),
        importers,
    })
}

fn environments(dir: &Path, settings: &Settings) -> Result<Report> {
    let found = find_environments(dir, settings)?;
    let root = std::fs::canonicalize(dir)?;
    Ok(Report::Environments {
        environments: found
            .iter()
            .map(|env| fs::to_slash(&fs::relative_to(env, &root)))
            .collect(),
        root,
    })
}

/// Write the default configuration file unless one already exists
pub fn init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Configuration file already exists at: {}", config_path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    config::create_default_config(config_path)?;

    println!("Created default configuration file at: {}", config_path.display());
    println!("Every setting in it is commented out; uncomment the ones you want to change.");
    Ok(())
}

/// Exit code for a failed run
pub fn exit_code(err: &DepsError) -> i32 {
    if err.is_config_error() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_FAILURE
    }
}

/// Load settings, run the command and print its report
pub fn execute(args: &Args) -> Result<()> {
    let command = Command::from_args(args);

    let settings = if command.needs_settings() {
        config::load_config(&CliArgs::from(args))?
    } else {
        Settings::default()
    };
    debug!(?settings, "effective settings");

    if let Some(report) = command.execute(&settings)? {
        let formatter = create_formatter(settings.output_format, settings.use_colors, settings.quiet);
        StdoutWriter.write(&formatter.format(&report)?)?;
    }
    Ok(())
}

/// Run the command and turn any error into a message on stderr and an exit code
pub fn run(args: &Args) -> i32 {
    match execute(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            if let Some(suggestion) = err.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            exit_code(&err)
        }
    }
}
