//! scripted stand-ins for the terminal and external programs

use crate::error::ToolError;
use crate::git::Runner;
use crate::ui::{KeySource, Terminal};
use anyhow::{Result, bail};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

/// replays keystrokes from a string
pub struct ScriptedKeys {
    keys: VecDeque<char>,
    pub reads: usize,
}

impl ScriptedKeys {
    pub fn new(script: &str) -> Self {
        Self {
            keys: script.chars().collect(),
            reads: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<char> {
        let Some(key) = self.keys.pop_front() else {
            bail!("key script exhausted after {} reads", self.reads);
        };
        self.reads += 1;
        Ok(key)
    }
}

/// records mode switches instead of touching the tty
#[derive(Default)]
pub struct CountingTerminal {
    pub raw: bool,
    pub raw_entries: usize,
    pub restores: usize,
    pub fail_enter: bool,
}

impl Terminal for CountingTerminal {
    fn is_raw(&self) -> io::Result<bool> {
        Ok(self.raw)
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        if self.fail_enter {
            return Err(io::Error::other("not a terminal"));
        }
        self.raw = true;
        self.raw_entries += 1;
        Ok(())
    }

    fn restore_cooked(&mut self) -> io::Result<()> {
        self.raw = false;
        self.restores += 1;
        Ok(())
    }
}

/// answers git queries from canned output and records every invocation
pub struct FakeRunner {
    dir: PathBuf,
    pub diff_raw: String,
    pub untracked: String,
    pub diffs: HashMap<String, String>,
    /// any invocation whose command line contains this fails to spawn
    pub fail_on: Option<String>,
    pub calls: Vec<String>,
    /// (command, stdin) for every shell command given input
    pub piped: Vec<(String, String)>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::with_dir(Path::new("."))
    }

    pub fn with_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            diff_raw: String::new(),
            untracked: String::new(),
            diffs: HashMap::new(),
            fail_on: None,
            calls: Vec::new(),
            piped: Vec::new(),
        }
    }

    fn record(&mut self, program: &str, call: String) -> Result<(), ToolError> {
        let fails = self
            .fail_on
            .as_deref()
            .is_some_and(|pattern| call.contains(pattern));
        self.calls.push(call);
        if fails {
            return Err(ToolError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "scripted failure"),
            });
        }
        Ok(())
    }
}

impl Runner for FakeRunner {
    fn working_dir(&self) -> &Path {
        &self.dir
    }

    fn capture(&mut self, program: &str, args: &[&str]) -> Result<String, ToolError> {
        self.record(program, format!("{} {}", program, args.join(" ")))?;
        let output = if args.contains(&"--raw") {
            self.diff_raw.clone()
        } else if args.contains(&"ls-files") {
            self.untracked.clone()
        } else if args.first() == Some(&"diff") {
            let file = args.last().copied().unwrap_or_default();
            self.diffs.get(file).cloned().unwrap_or_default()
        } else {
            String::new()
        };
        Ok(output)
    }

    fn attached(&mut self, program: &str, args: &[&str]) -> Result<(), ToolError> {
        self.record(program, format!("{} {}", program, args.join(" ")))
    }

    fn shell(&mut self, command: &str, input: Option<&str>) -> Result<(), ToolError> {
        self.record("sh", format!("sh -c {command}"))?;
        if let Some(input) = input {
            self.piped.push((command.to_string(), input.to_string()));
        }
        Ok(())
    }
}
