//! Mutually exclusive draw/modify interaction mode.

/// Gates which edit operations the drawing collaborator may emit.
///
/// At most one of draw and modify is active; enabling one disables the
/// other. Both start off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    draw: bool,
    modify: bool,
}

impl EditMode {
    /// Creates the initial mode with both toggles off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if drawing is enabled.
    #[must_use]
    pub fn draw_enabled(&self) -> bool {
        self.draw
    }

    /// Returns true if modification is enabled.
    #[must_use]
    pub fn modify_enabled(&self) -> bool {
        self.modify
    }

    /// Toggles draw mode; enabling it forces modify off.
    pub fn toggle_draw(&mut self) {
        self.draw = !self.draw;
        if self.draw {
            self.modify = false;
        }
    }

    /// Toggles modify mode; enabling it forces draw off.
    pub fn toggle_modify(&mut self) {
        self.modify = !self.modify;
        if self.modify {
            self.draw = false;
        }
    }
}
