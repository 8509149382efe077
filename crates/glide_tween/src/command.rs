//! Tween handles and the cross-thread command queue
//!
//! Producers on any thread push commands; the ticking thread drains them in
//! FIFO order at the start of each tick. Handles are minted at enqueue time so
//! a spawn can be cancelled or paused before its first tick.

use crate::spec::TweenSpec;
use crate::values::TweenStrategy;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global handle counter; 0 is reserved for the invalid handle
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a scheduled tween
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

impl TweenHandle {
    /// The handle returned when a spawn is rejected
    pub const INVALID: Self = Self(0);

    /// Mint a new process-unique handle
    pub(crate) fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// A deferred scheduler mutation
pub enum Command {
    Spawn {
        handle: TweenHandle,
        spec: TweenSpec,
        strategy: Option<Box<dyn TweenStrategy>>,
    },
    Cancel {
        handle: TweenHandle,
        apply_final: bool,
    },
    Pause(TweenHandle),
    Resume(TweenHandle),
}

impl Command {
    pub fn handle(&self) -> TweenHandle {
        match self {
            Command::Spawn { handle, .. } | Command::Cancel { handle, .. } => *handle,
            Command::Pause(handle) | Command::Resume(handle) => *handle,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Spawn {
                handle, strategy, ..
            } => f
                .debug_struct("Spawn")
                .field("handle", handle)
                .field("has_strategy", &strategy.is_some())
                .finish(),
            Command::Cancel {
                handle,
                apply_final,
            } => f
                .debug_struct("Cancel")
                .field("handle", handle)
                .field("apply_final", apply_final)
                .finish(),
            Command::Pause(handle) => f.debug_tuple("Pause").field(handle).finish(),
            Command::Resume(handle) => f.debug_tuple("Resume").field(handle).finish(),
        }
    }
}

/// Multi-producer FIFO of pending commands
#[derive(Default)]
pub struct CommandQueue {
    commands: Mutex<Vec<Command>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.commands.lock().push(command);
    }

    /// Take every queued command, oldest first
    pub fn drain(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock())
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.lock().is_empty()
    }
}
