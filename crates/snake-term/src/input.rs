//! Line-based settings surface read from stdin.

use snake_core::{Result, SettingsCommand};
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::debug;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Settings(SettingsCommand),
    /// Start over with an empty log
    Restart,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Result<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "restart" => Ok(Input::Restart),
            "quit" | "exit" => Ok(Input::Quit),
            _ => SettingsCommand::parse(line).map(Input::Settings),
        }
    }
}

/// Feed every non-blank line of `reader` to `emit` until end of input, a
/// read error, or `emit` returning false.
///
/// Bytes that are not valid UTF-8 are replaced rather than treated as a read
/// error, so a garbled line is rejected by the parser like any other bad
/// input and later lines are still read.
pub fn read_inputs<R, F>(mut reader: R, mut emit: F)
where
    R: BufRead,
    F: FnMut(Result<Input>) -> bool,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if line.trim().is_empty() {
                    continue;
                }
                if !emit(Input::parse(&line)) {
                    break;
                }
            }
            Err(e) => {
                emit(Err(e.into()));
                break;
            }
        }
    }
}

/// Read stdin on a dedicated thread, so a pending read never holds up
/// runtime shutdown. Parse failures are passed through for the caller to
/// report; the channel closes with stdin.
pub fn spawn_stdin_reader() -> mpsc::Receiver<Result<Input>> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        read_inputs(std::io::stdin().lock(), |input| tx.blocking_send(input).is_ok());
        debug!("stdin closed");
    });

    rx
}
