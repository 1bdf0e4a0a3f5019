use crate::actions::Workflow;
use crate::constants::{ADD_PREFIX, RECORD_PREFIX};
use crate::pipeline::Pipeline;
use clap::Parser;
use std::path::PathBuf;

/// git-ui: review changes one file at a time before committing them
#[derive(Parser, Debug)]
#[command(
    name = "git-ui",
    about,
    long_about = None,
    disable_version_flag = true,
    after_help = "commands:\n  record  review changes to tracked files\n  add     review untracked files"
)]
pub struct Cli {
    /// run as if started in <path>
    #[arg(short = 'C', value_name = "path", default_value = ".")]
    pub directory: PathBuf,

    /// workflow to run (`record` or `add`, any prefix-extended spelling)
    pub command: String,

    /// passed through to git commit
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// the command word followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.command.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// pick the pipeline for `argv[0]`; the rest is handed to the pipeline untouched
pub fn resolve(argv: &[String]) -> Option<Pipeline> {
    let (command, rest) = argv.split_first()?;
    let command = command.to_lowercase();

    let workflow = if command.starts_with(RECORD_PREFIX) {
        Workflow::Record
    } else if command.starts_with(ADD_PREFIX) {
        Workflow::Add
    } else {
        return None;
    };
    Some(Pipeline::new(workflow, rest.to_vec()))
}
