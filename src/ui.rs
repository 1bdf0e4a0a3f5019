use crate::actions::Action;
use anyhow::{Context, Result};
use std::io::{self, Write};

#[doc(hidden)]
#[macro_export]
macro_rules! __console {
    ($stream:ident, $color:ident, $($arg:tt)*) => {{
        use colored::Colorize;
        use std::io::Write;
        let _ = writeln!(std::io::$stream(), "{}", format!($($arg)*).$color());
    }};
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => { $crate::__console!(stderr, yellow, $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::__console!(stderr, red, $($arg)*) };
}

#[macro_export]
macro_rules! info {
    () => {{
        use std::io::Write;
        let _ = writeln!(std::io::stdout());
    }};
    ($($arg:tt)*) => {{
        use std::io::Write;
        let _ = writeln!(std::io::stdout(), $($arg)*);
    }};
}

/// source of single keystrokes
pub trait KeySource {
    /// block until exactly one key is pressed
    fn read_key(&mut self) -> Result<char>;
}

/// process-wide terminal input mode
pub trait Terminal {
    fn is_raw(&self) -> io::Result<bool>;

    /// deliver keystrokes without waiting for a newline
    fn enter_raw(&mut self) -> io::Result<()>;

    /// back to normal line-buffered input
    fn restore_cooked(&mut self) -> io::Result<()>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn is_raw(&self) -> io::Result<bool> {
        (**self).is_raw()
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        (**self).enter_raw()
    }

    fn restore_cooked(&mut self) -> io::Result<()> {
        (**self).restore_cooked()
    }
}

/// keystrokes from the controlling terminal (requires raw mode)
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> Result<char> {
        use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

        loop {
            let event = event::read().context("failed to read from terminal")?;
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event
            else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match code {
                // raw mode swallows SIGINT, so esc and ctrl-c quit instead
                KeyCode::Esc => break Ok(Action::Quit.key()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    break Ok(Action::Quit.key());
                }
                KeyCode::Char(c) => break Ok(c),
                _ => {}
            }
        }
    }
}

pub struct CrosstermTerminal;

impl Terminal for CrosstermTerminal {
    fn is_raw(&self) -> io::Result<bool> {
        crossterm::terminal::is_raw_mode_enabled()
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()
    }

    fn restore_cooked(&mut self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }
}

/// writer that emits `\r\n` for every `\n`
///
/// raw mode also turns off output post-processing, so a bare newline would
/// not return the cursor to column zero
pub struct CrlfWriter<W: Write> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl CrlfWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (i, chunk) in buf.split(|&b| b == b'\n').enumerate() {
            if i > 0 {
                self.inner.write_all(b"\r\n")?;
            }
            self.inner.write_all(chunk)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
