use crate::editor::services::ModelFormat;
use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Model file to import
    #[clap(help = "model file to import")]
    model: Option<String>,

    /// Format of the model file; guessed from the extension when omitted
    #[clap(short = 'f', long, help = "input format (aeon, sbml, bnet)")]
    format: Option<ModelFormat>,

    /// Where to save the exported model
    #[clap(short = 'o', long, help = "export the model to this path")]
    output: Option<String>,

    #[clap(long, default_value = "aeon", help = "output format (aeon, sbml)")]
    output_format: ModelFormat,

    #[clap(short = 'y', long, help = "answer yes to every confirmation")]
    yes: bool,

    #[clap(short = 'v', long, help = "enable debug logging")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    model: Option<String>,
    format: Option<ModelFormat>,
    output: Option<String>,
    output_format: ModelFormat,
    yes: bool,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            model: args.model,
            format: args.format,
            output: args.output,
            output_format: args.output_format,
            yes: args.yes,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Explicit format, or the one implied by the model file extension
    pub fn format(&self) -> Option<ModelFormat> {
        self.format
            .or_else(|| self.model.as_deref().and_then(ModelFormat::from_path))
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn output_format(&self) -> ModelFormat {
        self.output_format
    }

    pub fn yes(&self) -> bool {
        self.yes
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
