//! Swipe gesture mapping.
//!
//! A horizontal drag either commits a decision or snaps back, depending on
//! whether it crossed one of two symmetric thresholds. The mapping is a
//! pure function of the drag distance and knows nothing about rendering;
//! the TUI feeds it column deltas from terminal mouse events.

/// What a finished drag means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeCommand {
    /// Below threshold either way; snap back, decide nothing.
    None,
    /// Dragged right past the threshold: keep the file.
    CommitKeep,
    /// Dragged left past the threshold: discard the file.
    CommitDiscard,
}

/// Columns a drag must travel, in either direction, to commit.
pub const COMMIT_THRESHOLD: i32 = 8;

/// Maps a signed horizontal drag distance to a command. Thresholds are
/// symmetric: `+threshold` commits Keep, `-threshold` commits Discard.
pub fn classify_drag(distance: i32, threshold: i32) -> SwipeCommand {
    if distance >= threshold {
        SwipeCommand::CommitKeep
    } else if distance <= -threshold {
        SwipeCommand::CommitDiscard
    } else {
        SwipeCommand::None
    }
}

/// Accumulates press/drag/release positions into a drag distance.
#[derive(Debug, Default)]
pub struct DragTracker {
    origin: Option<u16>,
    current: Option<u16>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse button pressed at `column`.
    pub fn press(&mut self, column: u16) {
        self.origin = Some(column);
        self.current = Some(column);
    }

    /// Pointer moved to `column` while held.
    pub fn drag(&mut self, column: u16) {
        if self.origin.is_some() {
            self.current = Some(column);
        }
    }

    /// Signed distance of the drag in progress, if any.
    pub fn distance(&self) -> Option<i32> {
        match (self.origin, self.current) {
            (Some(origin), Some(current)) => Some(i32::from(current) - i32::from(origin)),
            _ => None,
        }
    }

    /// Button released at `column`; resolves the drag into a command.
    pub fn release(&mut self, column: u16) -> SwipeCommand {
        self.drag(column);
        let command = self
            .distance()
            .map(|d| classify_drag(d, COMMIT_THRESHOLD))
            .unwrap_or(SwipeCommand::None);
        self.origin = None;
        self.current = None;
        command
    }

    /// Forgets any drag in progress.
    pub fn reset(&mut self) {
        self.origin = None;
        self.current = None;
    }
}
