use crate::commands::{self, GenerateOptions};
use crate::error::{Error, Result};
use crate::fs::{absolute_path, write_file};
use crate::sass::DEFAULT_SASS_COMPILER;
use clap::{ArgAction, Parser, Subcommand};
use cssvars::parser::FallbackOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bulma-css-vars", version)]
#[command(about = "Generate CSS custom properties for Bulma color functions", long_about = None)]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project directory holding the config file.
    #[arg(long = "cwd", value_name = "DIR", global = true)]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config and Sass entry file
    Init,
    /// Compile the Sass entry and write the theme file
    Generate {
        /// Use already compiled CSS instead of running the compiler.
        #[arg(long, value_name = "FILE")]
        css: Option<PathBuf>,

        /// Sass compiler executable.
        #[arg(long = "sass", value_name = "BIN", default_value = DEFAULT_SASS_COMPILER)]
        sass: String,
    },
    /// Print or write static fallbacks for a compiled stylesheet
    Fallbacks {
        #[arg(long, value_name = "FILE")]
        css: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Keep each original declaration after its fallback.
        #[arg(long = "keep-original")]
        keep_original: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| Error::io(".", e))?,
    };

    match cli.command {
        Command::Init => commands::init(&cwd),
        Command::Generate { css, sass } => commands::generate(
            &cwd,
            &GenerateOptions {
                css,
                sass_compiler: sass,
            },
        ),
        Command::Fallbacks {
            css,
            out,
            keep_original,
        } => {
            let fallbacks = commands::fallbacks(&cwd, &css, &FallbackOptions { keep_original })?;
            match out {
                Some(out) => {
                    let path = absolute_path(out, &cwd);
                    write_file(&path, &fallbacks)?;
                    log::info!("Updated {}", path.display());
                }
                None => println!("{}", fallbacks),
            }
            Ok(())
        }
    }
}
