use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliParameterError {
    #[error("Input file not found: {file}")]
    FileNotFound { file: String },

    #[error("Scene directory not found: {dir}")]
    DirectoryNotFound { dir: String },
}

#[derive(Parser, Debug)]
#[command(name = "webapitest")]
#[command(
    about = "Convert Postman collections to scene/case test suites and back, and run them.",
    long_about = "Convert Postman collections to scene/case test suites and back, run the scenes against a live server, edit case parameters as csv and manage the login cookies of test users."
)]
pub struct CliParameters {
    /// Project config file, defaults to ./webapitest.json
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Convert a Postman collection file into a scene directory
    Parse {
        /// the exported collection, e.g. deal.collection.json
        path: PathBuf,
        /// directory the scenes are written to
        #[arg(long)]
        casedir: PathBuf,
    },

    /// Convert a scene directory into a Postman collection file
    #[command(name = "parse2postmanfile")]
    Parse2PostmanFile {
        casedir: PathBuf,
        #[arg(long)]
        postmanfile: PathBuf,
        /// collection name, defaults to the directory name
        #[arg(long)]
        name: Option<String>,
    },

    /// Log the configured users in and run every scene
    #[command(name = "runcase")]
    RunCase { casedir: Option<PathBuf> },

    /// Write a csv next to every scene file
    #[command(name = "createcsv")]
    CreateCsv { casedir: Option<PathBuf> },

    /// Load every csv overlay and report the first broken one
    #[command(name = "checkcsv")]
    CheckCsv { casedir: Option<PathBuf> },

    /// Rewrite every scene file from its csv overlay
    #[command(name = "resetjsonbycsv")]
    ResetJsonByCsv { casedir: Option<PathBuf> },

    #[command(name = "cleandb")]
    CleanDb,

    #[command(name = "initdb")]
    InitDb,

    #[command(name = "startwebserver")]
    StartWebServer,
}

impl Command {
    /// Scene directory given on the command line, if any.
    pub fn casedir(&self) -> Option<&Path> {
        match self {
            Command::Parse { casedir, .. } | Command::Parse2PostmanFile { casedir, .. } => {
                Some(casedir.as_path())
            }
            Command::RunCase { casedir }
            | Command::CreateCsv { casedir }
            | Command::CheckCsv { casedir }
            | Command::ResetJsonByCsv { casedir } => casedir.as_deref(),
            Command::CleanDb | Command::InitDb | Command::StartWebServer => None,
        }
    }
}

impl CliParameters {
    pub fn validate(&self) -> Result<(), CliParameterError> {
        if let Command::Parse { path, .. } = &self.command {
            if !path.is_file() {
                return Err(CliParameterError::FileNotFound {
                    file: path.display().to_string(),
                });
            }
            // the output directory is created on demand
            return Ok(());
        }

        if let Some(casedir) = self.command.casedir() {
            if !casedir.is_dir() {
                return Err(CliParameterError::DirectoryNotFound {
                    dir: casedir.display().to_string(),
                });
            }
        }

        Ok(())
    }
}
