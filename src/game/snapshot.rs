use super::state::Position;

/// Read-only view of a game handed to a renderer
///
/// Borrowing the segments keeps a per-tick render free of allocation. The
/// renderer never sees the mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    /// Snake segments, head first
    pub segments: &'a [Position],
    pub food: Position,
    pub score: u32,
    pub game_over: bool,
    pub step_size: u32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Option<Position> {
        self.segments.first().copied()
    }

    pub fn columns(&self) -> u32 {
        self.window_width / self.step_size.max(1)
    }

    pub fn rows(&self) -> u32 {
        self.window_height / self.step_size.max(1)
    }

    /// Map a position to a (column, row) cell with row 0 at the top.
    ///
    /// Game coordinates are y-up, so the row is flipped. Returns `None` for
    /// positions outside the window.
    pub fn cell_of(&self, pos: Position) -> Option<(u32, u32)> {
        let step = self.step_size.max(1) as i32;
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let column = (pos.x / step) as u32;
        let from_bottom = (pos.y / step) as u32;
        if column >= self.columns() || from_bottom >= self.rows() {
            return None;
        }
        Some((column, self.rows() - 1 - from_bottom))
    }
}
