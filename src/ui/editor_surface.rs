//! FLTK editor behind the `EditingSurface` seam, plus the key guard that
//! stops edits from reaching the protected lines.

use std::ops::RangeInclusive;

use fltk::{
    app::{self, Sender},
    enums::{Color, Event, EventState, Font, Key},
    prelude::*,
    text::{StyleTableEntry, TextBuffer, TextEditor},
};

use crate::app::controllers::buffer::{BoundaryGuard, KeyKind};
use crate::app::controllers::surface::EditingSurface;
use crate::app::domain::caret::{Caret, Selection};
use crate::app::domain::messages::Message;
use crate::app::services::text_ops::{caret_at_offset, line_number_to_byte_position, offset_of_caret};

const PLAIN_STYLE: char = 'A';
const PROTECTED_STYLE: char = 'B';

/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// `TextBuffer::text()` copies FLTK's malloc'd string but never frees it,
/// which leaks the whole buffer on every call. This goes through the FFI
/// directly and frees the allocation.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: buf.as_ptr() is valid while buf exists. Fl_Text_Buffer_text
    // returns a malloc'd, null-terminated string (or null), which is copied
    // and then released with the matching free().
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let result = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

/// Keys that only move the caret or the view. Ctrl chords that do not
/// touch the text (copy, select all) count as navigation too.
pub fn classify_key(key: Key, ctrl: bool) -> KeyKind {
    let navigation = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::End,
        Key::Escape,
        Key::ShiftL,
        Key::ShiftR,
        Key::ControlL,
        Key::ControlR,
        Key::AltL,
        Key::AltR,
        Key::MetaL,
        Key::MetaR,
        Key::CapsLock,
    ];
    if navigation.contains(&key) {
        return KeyKind::Navigation;
    }
    if ctrl && (key == Key::from_char('c') || key == Key::from_char('a')) {
        return KeyKind::Navigation;
    }
    if key == Key::BackSpace {
        return KeyKind::DeleteBackward;
    }
    KeyKind::Edit
}

/// Style string for `text`: protected bytes first, plain bytes after.
fn protected_style(text: &str, lines: &RangeInclusive<usize>) -> String {
    let end = line_number_to_byte_position(text, lines.end() + 1).unwrap_or(text.len());
    let mut style = String::with_capacity(text.len());
    style.extend(std::iter::repeat_n(PROTECTED_STYLE, end));
    style.extend(std::iter::repeat_n(PLAIN_STYLE, text.len() - end));
    style
}

pub struct FltkSurface {
    editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
}

impl FltkSurface {
    /// Bind fresh text and style buffers to `editor`. Every text change
    /// sends `Message::BufferChanged`.
    pub fn new(editor: &TextEditor, sender: Sender<Message>, font: Font, font_size: i32) -> Self {
        let mut editor = editor.clone();
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();

        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                if deleted > 0 {
                    style_buf.remove(pos, pos + deleted);
                }
                if inserted > 0 {
                    let filler: String = std::iter::repeat_n(PLAIN_STYLE, inserted as usize).collect();
                    style_buf.insert(pos, &filler);
                }
                sender.send(Message::BufferChanged);
            }
        });

        editor.set_buffer(buffer.clone());
        let mut surface = Self {
            editor,
            buffer,
            style_buffer,
        };
        surface.set_font(font, font_size);
        surface
    }

    pub fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }

    pub fn line_count(&self) -> i32 {
        self.buffer.count_lines(0, self.buffer.length()) + 1
    }

    pub fn set_font(&mut self, font: Font, size: i32) {
        let table = vec![
            StyleTableEntry {
                color: Color::Foreground,
                font,
                size,
            },
            StyleTableEntry {
                color: Color::from_rgb(140, 140, 140),
                font,
                size,
            },
        ];
        self.editor.set_highlight_data(self.style_buffer.clone(), table);
        self.editor.set_text_font(font);
        self.editor.set_text_size(size);
        self.editor.redraw();
    }

    /// Block edit keys aimed at the protected lines. A blocked key asks
    /// the dispatcher to move the caret out; so does every mouse release.
    pub fn install_guard(&mut self, guard: BoundaryGuard, sender: Sender<Message>) {
        let buffer = self.buffer.clone();
        self.editor.handle(move |ed, ev| match ev {
            Event::KeyDown => {
                let ctrl = app::event_state().contains(EventState::Ctrl);
                let kind = classify_key(app::event_key(), ctrl);
                let caret_at = |pos: i32| {
                    let line = buffer.count_lines(0, pos) as usize + 1;
                    let column = (pos - buffer.line_start(pos)).max(0) as usize + 1;
                    Caret::new(line, column)
                };
                let caret = caret_at(ed.insert_position());
                let selection = buffer
                    .selection_position()
                    .map(|(start, end)| Selection::new(caret_at(start), caret_at(end)));
                if guard.allows(kind, caret, selection) {
                    false
                } else {
                    sender.send(Message::EnsureEditable);
                    true
                }
            }
            Event::Released => {
                sender.send(Message::EnsureEditable);
                false
            }
            _ => false,
        });
    }
}

impl EditingSurface for FltkSurface {
    fn text(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    fn caret(&self) -> Caret {
        let text = self.text();
        caret_at_offset(&text, self.editor.insert_position().max(0) as usize)
    }

    fn set_caret(&mut self, caret: Caret) {
        let text = self.text();
        self.buffer.unselect();
        self.editor.set_insert_position(offset_of_caret(&text, caret) as i32);
        self.editor.show_insert_position();
    }

    /// FLTK keeps a single undo step; dropping it keeps undo from
    /// reaching back across the regeneration.
    fn mark_undo_boundary(&mut self) {
        self.buffer.can_undo(false);
        self.buffer.can_undo(true);
    }

    fn decorate_protected(&mut self, lines: RangeInclusive<usize>) {
        let text = self.text();
        self.style_buffer.set_text(&protected_style(&text, &lines));
        self.editor.redraw();
    }

    fn is_alive(&self) -> bool {
        !self.editor.was_deleted()
    }
}
