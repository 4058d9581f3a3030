//! The editing surface seam: what the buffer controller needs from an editor widget.

use std::ops::RangeInclusive;

use crate::app::domain::caret::Caret;

/// Narrow interface onto the editor widget. Key dispatch, rendering and
/// highlighting stay on the widget's side.
pub trait EditingSurface {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn caret(&self) -> Caret;
    fn set_caret(&mut self, caret: Caret);
    fn mark_undo_boundary(&mut self);
    /// Visually mark `lines` (1-based, inclusive) as protected. The style is
    /// up to the surface.
    fn decorate_protected(&mut self, lines: RangeInclusive<usize>);

    /// False once the widget behind the surface has been destroyed.
    fn is_alive(&self) -> bool {
        true
    }
}

/// In-memory surface, used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub text: String,
    pub caret: Caret,
    pub decorated: Option<RangeInclusive<usize>>,
    pub undo_boundaries: usize,
    pub disposed: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user replacing the whole text, e.g. select-all + type.
    pub fn type_over(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Simulate typing `input` at the end of the text.
    pub fn append(&mut self, input: &str) {
        self.text.push_str(input);
    }
}

impl EditingSurface for MemorySurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn caret(&self) -> Caret {
        self.caret
    }

    fn set_caret(&mut self, caret: Caret) {
        self.caret = caret;
    }

    fn mark_undo_boundary(&mut self) {
        self.undo_boundaries += 1;
    }

    fn decorate_protected(&mut self, lines: RangeInclusive<usize>) {
        self.decorated = Some(lines);
    }

    fn is_alive(&self) -> bool {
        !self.disposed
    }
}
