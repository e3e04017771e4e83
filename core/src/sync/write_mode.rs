// cart_sync/src/sync/write_mode.rs

use std::fmt;
use std::str::FromStr;

/// How the synchronizer writes back after reading the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
  /// Plain read then write, with no retry. Two concurrent increments of an
  /// existing line can both read the same quantity, and one increment is
  /// lost. Two concurrent first adds do not overwrite each other: the later
  /// create fails with `StoreError::AlreadyExists`, which is returned to the caller.
  #[default]
  LastWriteWins,
  /// Updates are conditioned on the revision that was read, and creates on
  /// the key still being absent. A lost race re-runs the whole read/write
  /// cycle, up to `max_attempts` cycles in total.
  Guarded { max_attempts: u32 },
}

impl WriteMode {
  pub fn guarded(max_attempts: u32) -> Self {
    WriteMode::Guarded {
      max_attempts: max_attempts.max(1),
    }
  }

  pub fn max_attempts(&self) -> u32 {
    match self {
      WriteMode::LastWriteWins => 1,
      WriteMode::Guarded { max_attempts } => (*max_attempts).max(1),
    }
  }

  pub fn is_guarded(&self) -> bool {
    matches!(self, WriteMode::Guarded { .. })
  }
}

impl fmt::Display for WriteMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WriteMode::LastWriteWins => f.write_str("last_write_wins"),
      WriteMode::Guarded { max_attempts } => write!(f, "guarded(max_attempts={})", max_attempts),
    }
  }
}

/// Parses the mode name only; `guarded` gets a single attempt until the caller sets a budget.
impl FromStr for WriteMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "last_write_wins" | "lww" => Ok(WriteMode::LastWriteWins),
      "guarded" => Ok(WriteMode::guarded(1)),
      other => Err(format!(
        "unknown write mode '{}', expected 'last_write_wins' or 'guarded'",
        other
      )),
    }
  }
}
