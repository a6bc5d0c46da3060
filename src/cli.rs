//! Minimal CLI: schema → (mock value | definition listing)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::error::Error;
use crate::synth::{SynthOptions, Synthesizer};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// synthesize mock JSON values from JSON-Schema-like documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize mock values for each input schema
    Generate(GenerateOut),
    /// list the `$id` definitions indexed from each input schema
    Definitions(DefinitionsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// values per input; more than one emits an array
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,

    /// fixed RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// nested $ref expansions before emitting nothing (guards cyclic refs)
    #[arg(long)]
    max_depth: Option<usize>,

    /// JSON options file (`max_depth`, `seed`); flags win over file values
    #[arg(long = "options")]
    options_file: Option<PathBuf>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DefinitionsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(&Path, Value)) -> anyhow::Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path).map_err(|source| Error::Io {
                path: source_path.clone(),
                source,
            })?;
            let json_value = serde_json::from_str::<Value>(&source).map_err(|source| Error::Json {
                path: source_path.clone(),
                source,
            })?;
            apply(&source_path, json_value);
        }
        Ok(())
    }
}

impl GenerateOut {
    fn options(&self) -> anyhow::Result<SynthOptions> {
        let mut options = match self.options_file.as_ref() {
            Some(path) => {
                let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                crate::path_de::from_str_with_path::<SynthOptions>(&src)
                    .with_context(|| format!("in options file {}", path.display()))?
            }
            None => SynthOptions::default(),
        };
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let options = target.options()?;
                tracing::debug!(?options, "generating");
                let mut synth = Synthesizer::from_options(options);

                // absent results render as null so every input yields a document
                let mut outputs = Vec::<Value>::new();
                target.input_settings.load_process(|path, document| {
                    let values: Vec<Value> = synth
                        .generate_many(&document, target.count)
                        .into_iter()
                        .map(Option::unwrap_or_default)
                        .collect();
                    tracing::debug!(path = %path.display(), count = values.len(), "synthesized");
                    outputs.push(match <[Value; 1]>::try_from(values) {
                        Ok([single]) => single,
                        Err(values) => Value::Array(values),
                    });
                })?;

                let output = match <[Value; 1]>::try_from(outputs) {
                    Ok([single]) => single,
                    Err(outputs) => Value::Array(outputs),
                };
                let output_src = if target.compact {
                    serde_json::to_string(&output)?
                } else {
                    serde_json::to_string_pretty(&output)?
                };
                write_output(target.out.as_deref(), &output_src)
            }
            Command::Definitions(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let mut listing = String::new();
                target.input_settings.load_process(|path, document| {
                    let table = crate::definitions::index(Some(&document));
                    listing.push_str(&format!("{} ({} definitions)\n", path.display(), table.len()));
                    for def in table.iter() {
                        listing.push_str(&format!("  {}\t{}\n", def.id, def.schema.type_name()));
                    }
                })?;
                print!("{listing}");
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            // unreadable entries are skipped, the read itself reports them later
            out.extend(glob::glob(pattern)?.filter_map(Result::ok));
            if out.len() == before {
                return Err(Error::NoMatch(pattern.to_owned()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
