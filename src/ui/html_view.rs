use fltk::{enums::Color, misc::HelpView, prelude::*};

use crate::app::controllers::preview::RenderTarget;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::assembler::body_fragment;

/// Base HelpView text size at 100% scale.
const BASE_TEXT_SIZE: f64 = 14.0;

/// Wrap HTML in HelpView-compatible font tags.
fn wrap_for_helpview(html: &str) -> String {
    format!("<font face=\"Helvetica\">{}</font>", html)
}

/// The embedded A4 page. HelpView understands neither the head nor the
/// framework classes, so only the body markup is shown, at the current
/// page scale.
pub struct PageView {
    view: HelpView,
}

impl PageView {
    pub fn new(mut view: HelpView) -> Self {
        view.set_color(Color::White);
        view.set_text_size(BASE_TEXT_SIZE as i32);
        Self { view }
    }

    /// Move the page box to `(x, y, w, h)` and scale its text.
    pub fn place(&mut self, x: i32, y: i32, w: i32, h: i32, scale: f64) {
        self.view.resize(x, y, w, h);
        self.view.set_text_size(((BASE_TEXT_SIZE * scale).round() as i32).max(6));
        self.view.redraw();
    }
}

impl RenderTarget for PageView {
    fn name(&self) -> String {
        "page view".to_string()
    }

    fn is_open(&self) -> bool {
        !self.view.was_deleted()
    }

    fn render(&mut self, document: &str) -> Result<()> {
        if self.view.was_deleted() {
            return Err(AppError::TargetUnavailable(self.name()));
        }
        self.view.set_value(&wrap_for_helpview(body_fragment(document)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_for_helpview() {
        assert_eq!(wrap_for_helpview("<p>x</p>"), "<font face=\"Helvetica\"><p>x</p></font>");
    }
}
