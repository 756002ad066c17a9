//! File-based referee protocol
//!
//! The referee and both players share one directory:
//!
//! - `<team>.go`: it is our turn to move
//! - `<team>.pass`: the opponent closed a box, so we must pass
//! - `end_game`: the game is over
//! - `move_file`: the last move, one line `<name> x1,y1 x2,y2`
//!
//! A pass is written as the `0,0 0,0` sentinel.

use std::fs;
use std::io::ErrorKind;
use std::num::{IntErrorKind, ParseIntError};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::trace;

use crate::board::Vertex;
use crate::error::{Error, Result};

pub const END_GAME_FILE: &str = "end_game";
pub const MOVE_FILE: &str = "move_file";

/// What the referee is asking of us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSignal {
    Go,
    Pass,
    End,
}

/// A parsed `move_file` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLine {
    /// Team that wrote the line; empty if the line had no name
    pub team: String,
    pub v1: Vertex,
    pub v2: Vertex,
}

/// Parse one `move_file` line.
///
/// Returns `Ok(None)` when the line holds no move yet (empty file at the
/// start of a game, or fewer than two coordinate pairs).
///
/// # Example
///
/// ```
/// use dots::board::Vertex;
/// use dots::protocol::parse_move_line;
///
/// let mv = parse_move_line("rivals 3,4 3,5").unwrap().unwrap();
/// assert_eq!(mv.team, "rivals");
/// assert_eq!((mv.v1, mv.v2), (Vertex::new(3, 4), Vertex::new(3, 5)));
/// assert!(parse_move_line("").unwrap().is_none());
/// ```
pub fn parse_move_line(line: &str) -> Result<Option<MoveLine>> {
    let mut tokens = line.split_whitespace().peekable();
    let team = match tokens.peek() {
        Some(first) if !first.contains(',') => tokens.next().unwrap_or_default().to_string(),
        _ => String::new(),
    };

    let coords: Vec<&str> = tokens.filter(|t| t.contains(',')).collect();
    if coords.len() < 2 {
        return Ok(None);
    }

    let v1 = parse_vertex(line, coords[0])?;
    let v2 = parse_vertex(line, coords[1])?;
    Ok(Some(MoveLine { team, v1, v2 }))
}

fn parse_vertex(line: &str, token: &str) -> Result<Vertex> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| Error::move_format(line, format!("{:?} is not x,y", token)))?;
    let x = parse_coord(x)
        .map_err(|e| Error::move_format(line, format!("bad x in {:?}: {}", token, e)))?;
    let y = parse_coord(y)
        .map_err(|e| Error::move_format(line, format!("bad y in {:?}: {}", token, e)))?;
    Ok(Vertex::new(x, y))
}

/// Integers too large for `i32` clamp to its range; they are still
/// numbers, only off the grid.
fn parse_coord(s: &str) -> std::result::Result<i32, ParseIntError> {
    match s.trim().parse::<i32>() {
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(i32::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(i32::MIN),
        other => other,
    }
}

/// Render our move as a `move_file` line.
pub fn format_move(team: &str, v1: Vertex, v2: Vertex) -> String {
    format!("{} {} {}", team, v1, v2)
}

/// Order the endpoints the way the board stores them, so that
/// `(1,0) (0,0)` names the same edge as `(0,0) (1,0)`.
#[inline]
pub fn canonical(v1: Vertex, v2: Vertex) -> (Vertex, Vertex) {
    if v2 < v1 {
        (v2, v1)
    } else {
        (v1, v2)
    }
}

/// Our side of the shared referee directory.
#[derive(Debug, Clone)]
pub struct Referee {
    dir: PathBuf,
    team: String,
}

impl Referee {
    pub fn new(dir: impl Into<PathBuf>, team: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            team: team.into(),
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Check the signal files once. `end_game` wins over our own files.
    pub fn poll_turn(&self) -> Option<TurnSignal> {
        if self.path(END_GAME_FILE).exists() {
            return Some(TurnSignal::End);
        }
        if self.path(&format!("{}.go", self.team)).exists() {
            return Some(TurnSignal::Go);
        }
        if self.path(&format!("{}.pass", self.team)).exists() {
            return Some(TurnSignal::Pass);
        }
        None
    }

    /// Sleep-then-poll until the referee signals us.
    pub fn await_turn(&self, interval: Duration) -> TurnSignal {
        loop {
            thread::sleep(interval);
            if let Some(signal) = self.poll_turn() {
                trace!("turn signal {:?}", signal);
                return signal;
            }
        }
    }

    /// The last move in `move_file`, unless it is missing, empty or ours.
    pub fn read_opponent_move(&self) -> Result<Option<MoveLine>> {
        let path = self.path(MOVE_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(format!("read {}", path.display()), e)),
        };

        let line = text.lines().next().unwrap_or_default();
        Ok(parse_move_line(line)?.filter(|mv| mv.team != self.team))
    }

    pub fn write_move(&self, v1: Vertex, v2: Vertex) -> Result<()> {
        let path = self.path(MOVE_FILE);
        fs::write(&path, format_move(&self.team, v1, v2))
            .map_err(|e| Error::io(format!("write {}", path.display()), e))
    }

    pub fn write_pass(&self) -> Result<()> {
        self.write_move(Vertex::new(0, 0), Vertex::new(0, 0))
    }
}
