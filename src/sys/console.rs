use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use super::{refresh_commands, ConsoleError, Registrar};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Stop,
    RefreshCommands,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "stop" => Some(Self::Stop),
            "refresh_commands" => Some(Self::RefreshCommands),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleExit {
    /// The operator asked for shutdown.
    Stop,
    /// Input reached end of file.
    Closed,
}

/// Reads operator commands line by line until `stop` or end of input.
pub async fn run<R>(mut input: R, registrar: &dyn Registrar) -> Result<ConsoleExit, ConsoleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        // stray bytes are replaced, not fatal
        let line = String::from_utf8_lossy(&buf);
        match ConsoleCommand::parse(&line) {
            Some(ConsoleCommand::Stop) => {
                info!("Stopping...");
                return Ok(ConsoleExit::Stop);
            }
            Some(ConsoleCommand::RefreshCommands) => refresh_commands(registrar).await,
            None => debug!("ignoring console input {line:?}"),
        }
    }

    Ok(ConsoleExit::Closed)
}
