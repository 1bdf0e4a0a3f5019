use crate::changeset::{ChangeRecord, ChangeStatus};
use crate::constants::{RAW_LINE_SENTINEL, RAW_META_FIELDS};
use crate::error::ToolError;
use crate::ui::{CrosstermTerminal, Terminal};
use anyhow::{Context, Result};
use git2::Repository;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// sanity check that `dir` is inside a git work tree, returning the work tree root
///
/// git reports paths relative to the root, so everything runs from there
pub fn sanity_check(dir: &Path) -> Result<PathBuf> {
    // can be anywhere within the repo
    let repo = Repository::discover(dir).context("not in a git repository")?;
    repo.workdir()
        .map(Path::to_path_buf)
        .context("repository has no work tree (bare repository)")
}

/// runs external programs on behalf of the workflows
pub trait Runner {
    /// directory programs are started in
    fn working_dir(&self) -> &Path;

    /// run `program` to completion and return its stdout
    fn capture(&mut self, program: &str, args: &[&str]) -> Result<String, ToolError>;

    /// run `program` attached to the terminal
    fn attached(&mut self, program: &str, args: &[&str]) -> Result<(), ToolError>;

    /// run a `sh -c` command line attached to the terminal, optionally feeding `input` on stdin
    fn shell(&mut self, command: &str, input: Option<&str>) -> Result<(), ToolError>;
}

/// runs real child processes
pub struct ProcessRunner<T: Terminal = CrosstermTerminal> {
    dir: PathBuf,
    terminal: T,
}

impl ProcessRunner {
    pub fn new(dir: &Path) -> Self {
        Self::with_terminal(dir, CrosstermTerminal)
    }
}

impl<T: Terminal> ProcessRunner<T> {
    pub fn with_terminal(dir: &Path, terminal: T) -> Self {
        Self {
            dir: dir.to_path_buf(),
            terminal,
        }
    }
}

impl<T: Terminal> Runner for ProcessRunner<T> {
    fn working_dir(&self) -> &Path {
        &self.dir
    }

    fn capture(&mut self, program: &str, args: &[&str]) -> Result<String, ToolError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: program.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn attached(&mut self, program: &str, args: &[&str]) -> Result<(), ToolError> {
        let dir = &self.dir;
        let status = with_cooked_terminal(&mut self.terminal, program, || {
            Command::new(program)
                .args(args)
                .current_dir(dir)
                .status()
                .map_err(|source| ToolError::Spawn {
                    program: program.to_string(),
                    source,
                })
        })?;

        if !status.success() {
            return Err(ToolError::Failed {
                program: program.to_string(),
                status,
                stderr: String::new(),
            });
        }
        Ok(())
    }

    fn shell(&mut self, command: &str, input: Option<&str>) -> Result<(), ToolError> {
        let dir = &self.dir;
        with_cooked_terminal(&mut self.terminal, command, || {
            let mut child = Command::new("sh")
                .arg("-c")
                .arg(command)
                .current_dir(dir)
                .stdin(if input.is_some() {
                    Stdio::piped()
                } else {
                    Stdio::inherit()
                })
                .spawn()
                .map_err(|source| ToolError::Spawn {
                    program: command.to_string(),
                    source,
                })?;

            if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
                // the pager may quit before reading everything
                match stdin.write_all(input.as_bytes()) {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                        let _ = child.wait();
                        return Err(ToolError::Io {
                            program: command.to_string(),
                            source: e,
                        });
                    }
                    _ => {}
                }
            }

            let status = child.wait().map_err(|source| ToolError::Io {
                program: command.to_string(),
                source,
            })?;
            if !status.success() {
                return Err(ToolError::Failed {
                    program: command.to_string(),
                    status,
                    stderr: String::new(),
                });
            }
            Ok(())
        })
    }
}

/// run `f` with the terminal line-buffered, as interactive children
/// (pager, editor, git commit) expect, then put raw mode back
///
/// failing to get back into raw mode is an error even when `f` succeeded
fn with_cooked_terminal<T>(
    terminal: &mut impl Terminal,
    program: &str,
    f: impl FnOnce() -> Result<T, ToolError>,
) -> Result<T, ToolError> {
    let mode_error = |source: std::io::Error| ToolError::Terminal {
        program: program.to_string(),
        source,
    };

    if !terminal.is_raw().map_err(mode_error)? {
        return f();
    }
    terminal.restore_cooked().map_err(mode_error)?;
    let result = f();
    terminal.enter_raw().map_err(mode_error)?;
    result
}

/// unstaged changes to tracked files, in git's order
pub fn list_changes(runner: &mut dyn Runner) -> Result<Vec<ChangeRecord>, ToolError> {
    let output = runner.capture("git", &["diff", "--raw", "-z"])?;
    Ok(parse_raw_output(&output))
}

/// untracked files that are not ignored
pub fn list_untracked(runner: &mut dyn Runner) -> Result<Vec<ChangeRecord>, ToolError> {
    let output = runner.capture("git", &["ls-files", "-z", "--others", "--exclude-standard"])?;
    Ok(output
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(ChangeRecord::untracked)
        .collect())
}

/// parse `git diff --raw -z` output, e.g.
/// `:100644 100644 8a1b2c3 0000000 M\0src/main.rs\0`
///
/// every change is a `:` metadata field followed by its path, or by source and
/// destination paths for renames and copies; paths are never quoted. changes
/// that aren't well-formed are skipped
fn parse_raw_output(output: &str) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    let mut fields = output.split('\0');

    while let Some(field) = fields.next() {
        let Some(meta) = field.strip_prefix(RAW_LINE_SENTINEL) else {
            continue;
        };
        let meta: Vec<&str> = meta.split_whitespace().collect();
        if meta.len() != RAW_META_FIELDS {
            continue;
        }

        // consume the paths even when the status is unknown, so they
        // can't be mistaken for the next metadata field
        let path_count = if meta[4].starts_with(['R', 'C']) { 2 } else { 1 };
        let paths: Vec<&str> = fields.by_ref().take(path_count).collect();
        if paths.len() != path_count || paths.iter().any(|path| path.is_empty()) {
            continue;
        }
        let Some(status) = ChangeStatus::parse(meta[4]) else {
            continue;
        };

        let mut record = ChangeRecord::changed(paths[path_count - 1], status);
        if path_count == 2 {
            record.old_path = Some(paths[0].to_string());
        }
        records.push(record);
    }

    records
}

/// unified diff of the unstaged changes to `filename`
pub fn diff(runner: &mut dyn Runner, filename: &str) -> Result<String, ToolError> {
    runner.capture("git", &["diff", "--", filename])
}

/// stage `files` in the index
pub fn stage(runner: &mut dyn Runner, files: &[&str]) -> Result<(), ToolError> {
    let mut args = vec!["add", "--"];
    args.extend_from_slice(files);
    runner.attached("git", &args)
}

/// commit exactly `files`, passing `extra` options through to git commit
///
/// uses the git binary so commit signing and hooks work as expected
pub fn commit(runner: &mut dyn Runner, extra: &[String], files: &[&str]) -> Result<(), ToolError> {
    let mut args = vec!["commit"];
    args.extend(extra.iter().map(String::as_str));
    args.push("--");
    args.extend_from_slice(files);
    runner.attached("git", &args)
}
