//! `rdf2vowl` command line interface.
use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use clap::Parser;

use crate::{config::Config, convert, logger, ontology::Iri, Result};

/// Convert a Turtle ontology into VOWL JSON
#[derive(Parser, Debug)]
#[command(name = "rdf2vowl", version, about, long_about = None)]
pub struct Cli {
    /// Turtle file to convert, `-` reads stdin
    pub input: PathBuf,

    /// YAML or JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Class to drop with its sub-classes and members (repeatable)
    #[arg(short, long = "exclude", value_name = "IRI")]
    pub exclude: Vec<Iri>,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent the generated JSON
    #[arg(long)]
    pub pretty: bool,

    /// Emit transitive/symmetric tags, inverse and equivalent ids
    #[arg(long)]
    pub semantic_attributes: bool,

    /// Override the configured log level
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Merges the configuration file with command line flags.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration can not be loaded or the log
    /// level is unknown.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(level) = &self.log_level {
            config.set_log_level(level)?;
        }
        config.conversion = config
            .conversion
            .with_excluded(self.exclude.iter().cloned());
        if self.semantic_attributes {
            config.conversion.semantic_attributes = true;
        }
        Ok(config)
    }

    /// Runs one conversion.
    ///
    /// # Errors
    ///
    /// Any I/O, configuration or conversion failure.
    pub fn run(&self, config: &Config) -> Result<()> {
        let text = read_input(&self.input)?;
        let document = convert::convert(&text, &config.conversion)?;
        let json = document.to_json(self.pretty)?;

        match &self.output {
            Some(path) => std::fs::write(path, json)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Entry point of the `rdf2vowl` binary.
///
/// # Errors
///
/// See [`Cli::run`].
pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;
    logger::init(&config.logger)?;
    cli.run(&config)
}
