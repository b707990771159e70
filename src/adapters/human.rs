//! Console player

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::{Error, Result, ports::Agent, tictactoe::Board};

/// Prompt shown before every move
pub const MOVE_PROMPT: &str = "Your next move (cell index 1-9):";

/// Human player reading one-based cell indices from `input`
///
/// The board and the prompt are written to `output` before each read.
/// Anything other than the index of a free cell is rejected and the prompt
/// repeats; the board is not touched until a valid index arrives.
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanAgent<StdinLock<'static>, Stdout> {
    /// Human player on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            name: "Human".to_string(),
            input,
            output,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Give back the output sink (used to inspect transcripts)
    pub fn into_output(self) -> W {
        self.output
    }

    fn io_error(operation: &str, source: io::Error) -> Error {
        Error::Io {
            operation: operation.to_string(),
            source,
        }
    }

    /// Parse one line into a zero-based index of a free cell
    fn parse_move(line: &str, board: &Board) -> Option<usize> {
        let cell: usize = line.trim().parse().ok()?;
        let position = cell.checked_sub(1)?;
        (position < 9 && board.is_empty(position)).then_some(position)
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        if board.available_actions().is_empty() {
            return Err(Error::NoValidMoves);
        }

        loop {
            writeln!(self.output, "{board}").map_err(|e| Self::io_error("write board", e))?;
            write!(self.output, "{MOVE_PROMPT}").map_err(|e| Self::io_error("write prompt", e))?;
            self.output
                .flush()
                .map_err(|e| Self::io_error("flush prompt", e))?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| Self::io_error("read move", e))?;
            if read == 0 {
                return Err(Self::io_error(
                    "read move",
                    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"),
                ));
            }

            if let Some(position) = Self::parse_move(&line, board) {
                return Ok(position);
            }
            writeln!(self.output, "Invalid move; try again:\n")
                .map_err(|e| Self::io_error("write retry notice", e))?;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
