//! Protected buffer controller.
//!
//! The logical buffer shown to the editor is `prefix + "\n" + user_content`.
//! The prefix ends with a newline, so its last line is empty. The separator
//! newline fills that line (the boundary line), which keeps lines
//! `1..=protected_lines` byte-identical to the generated prefix.

use std::cell::Cell;
use std::ops::RangeInclusive;
use std::rc::Rc;

use tracing::{debug, trace};

use super::surface::EditingSurface;
use crate::app::domain::caret::{Caret, Selection};
use crate::app::domain::config::PageConfig;
use crate::app::services::templates::generate_prefix;
use crate::app::services::text_ops::{line_count, lines_from, trim_leading_blank_lines};

pub const DEFAULT_PLACEHOLDER: &str = "    <!-- Start writing your HTML here -->";

/// How user content is normalised when it is pulled out of the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferPolicy {
    /// Line written below the boundary whenever there is no user content.
    pub placeholder: String,
    /// Drop blank lines at the top of extracted content.
    pub trim_leading_blank_lines: bool,
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            trim_leading_blank_lines: true,
        }
    }
}

/// Whether a key press edits text or only moves the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Navigation,
    /// Backspace: also removes the character before the caret.
    DeleteBackward,
    Edit,
}

/// Shared view of the current boundary, cheap to clone into key handlers
/// that must decide synchronously.
#[derive(Debug, Clone, Default)]
pub struct BoundaryGuard {
    protected_lines: Rc<Cell<usize>>,
}

impl BoundaryGuard {
    pub fn protected_lines(&self) -> usize {
        self.protected_lines.get()
    }

    fn set_protected_lines(&self, count: usize) {
        self.protected_lines.set(count);
    }

    pub fn is_protected(&self, line: usize) -> bool {
        line <= self.protected_lines.get()
    }

    /// Navigation always passes. Edits pass only when neither the caret
    /// nor the selection reaches into the protected lines.
    pub fn allows(&self, key: KeyKind, caret: Caret, selection: Option<Selection>) -> bool {
        if key == KeyKind::Navigation {
            return true;
        }
        if self.is_protected(caret.line) {
            return false;
        }
        match selection.filter(|sel| !sel.is_empty()) {
            Some(sel) => !self.is_protected(sel.first_line()),
            // Backspace at the start of the first editable line would
            // remove the newline that ends the boundary line.
            None => !(key == KeyKind::DeleteBackward && caret == Caret::line_start(self.protected_lines() + 1)),
        }
    }
}

/// Why the controller had to step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The edit left no line below the boundary.
    BoundaryDestroyed,
    /// Enough lines survived, but the protected text itself was changed.
    PrefixAltered,
    /// An input attempt or pointer action left the caret in the protected lines.
    CaretInProtectedRegion,
}

/// A correction to push back to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub reason: Violation,
    /// Replacement text, or None when only the caret moves.
    pub text: Option<String>,
    pub caret: Caret,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Accepted,
    Recovered(Recovery),
}

/// Result of swapping the prefix after a configuration change.
#[derive(Debug, Clone, PartialEq)]
pub struct Regeneration {
    pub text: String,
    pub caret: Caret,
    pub protected_lines: usize,
}

pub struct ProtectedBuffer {
    config: PageConfig,
    prefix: String,
    user_content: String,
    /// What the surface shows (or will show once pending recoveries settle).
    text: String,
    guard: BoundaryGuard,
    policy: BufferPolicy,
    /// Bumped on every change that invalidates deferred surface work.
    generation: u64,
}

fn compose(prefix: &str, user_content: &str) -> String {
    let mut text = String::with_capacity(prefix.len() + 1 + user_content.len());
    text.push_str(prefix);
    text.push('\n');
    text.push_str(user_content);
    text
}

impl ProtectedBuffer {
    /// Build the buffer for `config`. Blank or missing initial text falls
    /// back to the placeholder line.
    pub fn initialize(config: PageConfig, initial_user_text: Option<&str>, policy: BufferPolicy) -> Self {
        let prefix = generate_prefix(&config);
        let user_content = match initial_user_text {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => policy.placeholder.clone(),
        };
        let text = compose(&prefix, &user_content);

        let guard = BoundaryGuard::default();
        guard.set_protected_lines(line_count(&prefix));

        debug!(
            framework = %config.framework,
            orientation = %config.orientation,
            protected_lines = guard.protected_lines(),
            "buffer initialized"
        );

        Self {
            config,
            prefix,
            user_content,
            text,
            guard,
            policy,
            generation: 0,
        }
    }

    pub fn config(&self) -> PageConfig {
        self.config
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Canonical user content, as last accepted.
    pub fn user_content(&self) -> &str {
        &self.user_content
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn protected_lines(&self) -> usize {
        self.guard.protected_lines()
    }

    pub fn protected_range(&self) -> RangeInclusive<usize> {
        1..=self.protected_lines()
    }

    pub fn guard(&self) -> BoundaryGuard {
        self.guard.clone()
    }

    pub fn policy(&self) -> &BufferPolicy {
        &self.policy
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First position the user may edit: column 1 just below the boundary.
    pub fn first_editable(&self) -> Caret {
        Caret::line_start(self.protected_lines() + 1)
    }

    /// User content is the text below the boundary, minus leading blank
    /// lines when the policy asks for it.
    fn extract_user_content<'a>(&self, below_boundary: &'a str) -> &'a str {
        if self.policy.trim_leading_blank_lines {
            trim_leading_blank_lines(below_boundary)
        } else {
            below_boundary
        }
    }

    fn content_or_placeholder(&self, content: &str) -> String {
        if content.trim().is_empty() {
            self.policy.placeholder.clone()
        } else {
            content.to_string()
        }
    }

    /// Lines `1..=protected_lines` of `text` match the prefix and at least one
    /// line follows them.
    fn boundary_intact(&self, text: &str) -> bool {
        text.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.starts_with('\n'))
    }

    fn rebuild(&mut self, user_content: String) {
        self.text = compose(&self.prefix, &user_content);
        self.user_content = user_content;
        self.generation += 1;
    }

    /// Reconcile the surface's new full text with the boundary.
    pub fn on_buffer_changed(&mut self, new_text: &str) -> EditOutcome {
        let protected = self.protected_lines();

        if line_count(new_text) <= protected {
            let placeholder = self.policy.placeholder.clone();
            self.rebuild(placeholder);
            debug!(protected, "boundary destroyed, buffer reset");
            return EditOutcome::Recovered(Recovery {
                reason: Violation::BoundaryDestroyed,
                text: Some(self.text.clone()),
                caret: self.first_editable(),
            });
        }

        if !self.boundary_intact(new_text) {
            // Keep whatever sits after an intact prefix; otherwise fall back
            // to the lines below the boundary index.
            let salvaged = match new_text.strip_prefix(self.prefix.as_str()) {
                Some(rest) => rest,
                None => lines_from(new_text, protected),
            };
            let content = self.content_or_placeholder(self.extract_user_content(salvaged));
            self.rebuild(content);
            debug!(protected, "protected text altered, prefix restored");
            return EditOutcome::Recovered(Recovery {
                reason: Violation::PrefixAltered,
                text: Some(self.text.clone()),
                caret: self.first_editable(),
            });
        }

        let content = self.extract_user_content(lines_from(new_text, protected)).to_string();
        trace!(bytes = content.len(), "edit accepted");
        self.user_content = content;
        // An echo of text the controller itself pushed keeps pending steps current.
        if new_text != self.text {
            self.text = new_text.to_string();
            self.generation += 1;
        }
        EditOutcome::Accepted
    }

    /// Swap in the prefix for `config`, carrying the current user content over by value.
    ///
    /// The caret stays where it was when that position is already below the
    /// new boundary; otherwise it moves to the first editable position.
    pub fn on_configuration_changed(&mut self, config: PageConfig, caret: Caret) -> Regeneration {
        let content = self.content_or_placeholder(&self.user_content);

        self.config = config;
        self.prefix = generate_prefix(&config);
        self.guard.set_protected_lines(line_count(&self.prefix));
        self.rebuild(content);

        let protected_lines = self.protected_lines();
        let caret = if caret.line > protected_lines && caret.line <= line_count(&self.text) {
            caret
        } else {
            self.first_editable()
        };

        debug!(
            framework = %config.framework,
            orientation = %config.orientation,
            protected_lines,
            generation = self.generation,
            "prefix regenerated"
        );

        Regeneration {
            text: self.text.clone(),
            caret,
            protected_lines,
        }
    }

    /// After a rejected input or a pointer action: make sure something is
    /// editable and the caret sits outside the protected lines.
    pub fn ensure_editable(&mut self, current_text: &str, caret: Caret) -> Option<Recovery> {
        if line_count(current_text) <= self.protected_lines() || !self.boundary_intact(current_text) {
            return match self.on_buffer_changed(current_text) {
                EditOutcome::Recovered(recovery) => Some(recovery),
                EditOutcome::Accepted => None,
            };
        }
        if self.guard.is_protected(caret.line) {
            trace!(line = caret.line, "caret moved out of protected region");
            return Some(Recovery {
                reason: Violation::CaretInProtectedRegion,
                text: None,
                caret: self.first_editable(),
            });
        }
        None
    }

    /// Push the full buffer to a surface, decorate the protected lines and
    /// park the caret at the first editable position.
    pub fn present(&self, surface: &mut dyn EditingSurface) {
        surface.set_text(&self.text);
        surface.decorate_protected(self.protected_range());
        surface.set_caret(self.first_editable());
    }

    pub fn apply_recovery(&self, surface: &mut dyn EditingSurface, recovery: &Recovery) {
        if let Some(text) = &recovery.text {
            surface.set_text(text);
            surface.decorate_protected(self.protected_range());
        }
        surface.set_caret(recovery.caret);
    }

    /// Immediate half of a regeneration: new text behind an undo boundary.
    pub fn apply_regeneration(&self, surface: &mut dyn EditingSurface, regeneration: &Regeneration) {
        surface.mark_undo_boundary();
        surface.set_text(&regeneration.text);
    }

    /// Deferred half of a regeneration: decorations and caret.
    pub fn settle_regeneration(&self, surface: &mut dyn EditingSurface, caret: Caret) {
        surface.decorate_protected(self.protected_range());
        surface.set_caret(caret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::config::{Framework, Orientation};
    use crate::app::services::text_ops::leading_lines;

    fn tailwind_portrait() -> PageConfig {
        PageConfig::new(Framework::Tailwind, Orientation::Portrait)
    }

    fn bootstrap_landscape() -> PageConfig {
        PageConfig::new(Framework::Bootstrap, Orientation::Landscape)
    }

    fn buffer_with(content: &str) -> ProtectedBuffer {
        ProtectedBuffer::initialize(tailwind_portrait(), Some(content), BufferPolicy::default())
    }

    fn assert_prefix_intact(buffer: &ProtectedBuffer) {
        let p = buffer.protected_lines();
        assert_eq!(leading_lines(buffer.text(), p), leading_lines(buffer.prefix(), p));
        assert!(line_count(buffer.text()) > p);
    }

    #[test]
    fn test_initialize_with_placeholder() {
        let buffer = ProtectedBuffer::initialize(tailwind_portrait(), None, BufferPolicy::default());
        assert_eq!(buffer.user_content(), DEFAULT_PLACEHOLDER);
        assert_eq!(buffer.protected_lines(), line_count(buffer.prefix()));
        assert_eq!(line_count(buffer.text()), buffer.protected_lines() + 1);
        assert_prefix_intact(&buffer);
    }

    #[test]
    fn test_initialize_blank_text_uses_placeholder() {
        let buffer = buffer_with("  \n\t");
        assert_eq!(buffer.user_content(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_initialize_with_user_text() {
        let buffer = buffer_with("<p>Hello</p>");
        assert!(buffer.text().ends_with("<body>\n\n<p>Hello</p>"));
        assert_eq!(buffer.first_editable(), Caret::line_start(buffer.protected_lines() + 1));
    }

    #[test]
    fn test_edit_accepted_extracts_content() {
        let mut buffer = buffer_with("<p>a</p>");
        let edited = format!("{}\n<p>a</p>\n<p>b</p>", buffer.prefix());
        assert_eq!(buffer.on_buffer_changed(&edited), EditOutcome::Accepted);
        assert_eq!(buffer.user_content(), "<p>a</p>\n<p>b</p>");
        assert_eq!(buffer.text(), edited);
        assert_eq!(buffer.generation(), 1);
    }

    #[test]
    fn test_echo_of_own_text_keeps_generation() {
        let mut buffer = buffer_with("<p>a</p>");
        let regen = buffer.on_configuration_changed(bootstrap_landscape(), Caret::default());
        let generation = buffer.generation();
        assert_eq!(buffer.on_buffer_changed(&regen.text), EditOutcome::Accepted);
        assert_eq!(buffer.generation(), generation);
    }

    #[test]
    fn test_edit_trims_leading_blank_lines() {
        let mut buffer = buffer_with("<p>a</p>");
        let edited = format!("{}\n\n   \n<p>a</p>", buffer.prefix());
        buffer.on_buffer_changed(&edited);
        assert_eq!(buffer.user_content(), "<p>a</p>");
    }

    #[test]
    fn test_edit_keeps_blank_lines_when_policy_disabled() {
        let policy = BufferPolicy {
            trim_leading_blank_lines: false,
            ..BufferPolicy::default()
        };
        let mut buffer = ProtectedBuffer::initialize(tailwind_portrait(), Some("<p>a</p>"), policy);
        let edited = format!("{}\n\n<p>a</p>", buffer.prefix());
        buffer.on_buffer_changed(&edited);
        assert_eq!(buffer.user_content(), "\n<p>a</p>");
    }

    #[test]
    fn test_deleting_everything_resets() {
        let mut buffer = buffer_with("<p>gone</p>");
        let outcome = buffer.on_buffer_changed("");
        let EditOutcome::Recovered(recovery) = outcome else {
            panic!("expected recovery");
        };
        assert_eq!(recovery.reason, Violation::BoundaryDestroyed);
        assert_eq!(recovery.caret, buffer.first_editable());
        assert_eq!(recovery.text.as_deref(), Some(buffer.text()));
        assert_eq!(line_count(buffer.text()), buffer.protected_lines() + 1);
        assert_eq!(buffer.user_content(), DEFAULT_PLACEHOLDER);
        assert_eq!(buffer.generation(), 1);
        assert_prefix_intact(&buffer);
    }

    #[test]
    fn test_deleting_separator_resets() {
        let mut buffer = buffer_with("<p>x</p>");
        let prefix = buffer.prefix().to_string();
        let outcome = buffer.on_buffer_changed(&prefix);
        assert!(matches!(outcome, EditOutcome::Recovered(ref r) if r.reason == Violation::BoundaryDestroyed));
    }

    #[test]
    fn test_empty_user_region_is_accepted() {
        let mut buffer = buffer_with("<p>x</p>");
        let text = format!("{}\n", buffer.prefix());
        assert_eq!(buffer.on_buffer_changed(&text), EditOutcome::Accepted);
        assert_eq!(buffer.user_content(), "");
    }

    #[test]
    fn test_typing_on_boundary_line_is_repaired() {
        let mut buffer = buffer_with("<p>x</p>");
        let text = format!("{}oops\n<p>x</p>", buffer.prefix());
        let EditOutcome::Recovered(recovery) = buffer.on_buffer_changed(&text) else {
            panic!("expected recovery");
        };
        assert_eq!(recovery.reason, Violation::PrefixAltered);
        assert_eq!(buffer.user_content(), "oops\n<p>x</p>");
        assert_prefix_intact(&buffer);
    }

    #[test]
    fn test_altered_head_is_repaired_by_line_index() {
        let mut buffer = buffer_with("<p>x</p>");
        let tampered = buffer.text().replacen("HTML Preview", "Hacked", 1);
        let outcome = buffer.on_buffer_changed(&tampered);
        assert!(matches!(outcome, EditOutcome::Recovered(_)));
        assert_eq!(buffer.user_content(), "<p>x</p>");
        assert_prefix_intact(&buffer);
    }

    #[test]
    fn test_configuration_change_preserves_content() {
        let mut buffer = buffer_with("<p>Keep me</p>");
        let old_protected = buffer.protected_lines();
        let regen = buffer.on_configuration_changed(bootstrap_landscape(), Caret::line_start(1));

        assert_eq!(buffer.config(), bootstrap_landscape());
        assert_eq!(regen.protected_lines, old_protected + 1);
        assert_eq!(regen.protected_lines, line_count(buffer.prefix()));
        assert_eq!(regen.caret, buffer.first_editable());
        assert!(regen.text.contains("bootstrap.min.css"));
        assert!(regen.text.contains("size: A4 landscape"));
        assert!(regen.text.ends_with("\n<p>Keep me</p>"));
        assert_eq!(buffer.user_content(), "<p>Keep me</p>");
        assert_eq!(buffer.generation(), 1);
        assert_eq!(buffer.guard().protected_lines(), regen.protected_lines);
        assert_prefix_intact(&buffer);
    }

    #[test]
    fn test_repeated_regeneration_does_not_accumulate_blank_lines() {
        let mut buffer = buffer_with("<p>x</p>");
        for i in 0..6 {
            let config = if i % 2 == 0 { bootstrap_landscape() } else { tailwind_portrait() };
            let regen = buffer.on_configuration_changed(config, Caret::default());
            buffer.on_buffer_changed(&regen.text);
        }
        assert_eq!(buffer.text(), format!("{}\n<p>x</p>", buffer.prefix()));
    }

    #[test]
    fn test_configuration_change_with_blank_content_uses_placeholder() {
        let mut buffer = buffer_with("<p>x</p>");
        let text = format!("{}\n  ", buffer.prefix());
        buffer.on_buffer_changed(&text);
        let regen = buffer.on_configuration_changed(bootstrap_landscape(), Caret::default());
        assert!(regen.text.ends_with(DEFAULT_PLACEHOLDER));
    }

    #[test]
    fn test_configuration_change_keeps_caret_below_boundary() {
        let mut buffer = buffer_with("<p>1</p>\n<p>2</p>\n<p>3</p>");
        let p = buffer.protected_lines();
        let caret = Caret::new(p + 3, 4);
        let regen = buffer.on_configuration_changed(bootstrap_landscape(), caret);
        assert_eq!(regen.caret, caret);
    }

    #[test]
    fn test_guard_allows_navigation_everywhere() {
        let buffer = buffer_with("<p>x</p>");
        let guard = buffer.guard();
        assert!(guard.allows(KeyKind::Navigation, Caret::line_start(1), None));
        assert!(!guard.allows(KeyKind::Edit, Caret::line_start(1), None));
        assert!(!guard.allows(KeyKind::Edit, Caret::line_start(buffer.protected_lines()), None));
        assert!(guard.allows(KeyKind::Edit, buffer.first_editable(), None));
    }

    #[test]
    fn test_guard_rejects_selection_reaching_prefix() {
        let buffer = buffer_with("<p>x</p>");
        let guard = buffer.guard();
        let caret = buffer.first_editable();
        let selection = Selection::new(Caret::line_start(3), caret);
        assert!(!guard.allows(KeyKind::Edit, caret, Some(selection)));
        let inside = Selection::new(caret, Caret::new(caret.line, 5));
        assert!(guard.allows(KeyKind::Edit, caret, Some(inside)));
    }

    #[test]
    fn test_guard_rejects_backspace_at_first_editable_column() {
        let buffer = buffer_with("<p>Keep me</p>");
        let guard = buffer.guard();
        let start = buffer.first_editable();
        assert!(!guard.allows(KeyKind::DeleteBackward, start, None));
        assert!(!guard.allows(KeyKind::DeleteBackward, start, Some(Selection::new(start, start))));
        assert!(guard.allows(KeyKind::DeleteBackward, Caret::new(start.line, 2), None));
        assert!(guard.allows(KeyKind::DeleteBackward, Caret::line_start(start.line + 1), None));
        assert!(guard.allows(KeyKind::Edit, start, None));

        let word = Selection::new(start, Caret::new(start.line, 4));
        assert!(guard.allows(KeyKind::DeleteBackward, start, Some(word)));
    }

    #[test]
    fn test_ensure_editable_moves_caret() {
        let mut buffer = buffer_with("<p>x</p>");
        let text = buffer.text().to_string();
        let recovery = buffer.ensure_editable(&text, Caret::line_start(2)).unwrap();
        assert_eq!(recovery.reason, Violation::CaretInProtectedRegion);
        assert_eq!(recovery.text, None);
        assert_eq!(recovery.caret, buffer.first_editable());
        assert!(buffer.ensure_editable(&text, buffer.first_editable()).is_none());
    }

    #[test]
    fn test_ensure_editable_restores_missing_region() {
        let mut buffer = buffer_with("<p>x</p>");
        let prefix = buffer.prefix().to_string();
        let recovery = buffer.ensure_editable(&prefix, Caret::line_start(1)).unwrap();
        assert!(recovery.text.is_some());
        assert_eq!(line_count(buffer.text()), buffer.protected_lines() + 1);
    }
}
