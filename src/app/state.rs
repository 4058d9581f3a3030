use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use fltk::{
    app::Sender,
    dialog,
    enums::Font,
    frame::Frame,
    group::Group,
    menu::MenuBar,
    prelude::*,
    text::WrapMode,
    window::Window,
};

use super::controllers::page::PageController;
use super::controllers::preview::{ContainerSize, TargetHandle};
use super::domain::config::{Framework, Orientation};
use super::domain::messages::Message;
use super::domain::settings::AppSettings;
use super::infrastructure::export::{default_export_name, export_document};
use super::infrastructure::file_target::{cleanup_preview_dir, preview_dir, FileTarget};
use super::services::session::PersistedState;
use crate::ui::editor_surface::FltkSurface;
use crate::ui::file_dialogs::native_export_dialog;
use crate::ui::html_view::PageView;
use crate::ui::main_window::MainWidgets;
use crate::ui::menu::{framework_menu_path, orientation_menu_path};

pub struct AppState {
    pub controller: PageController,
    pub surface: FltkSurface,
    pub window: Window,
    pub menu: MenuBar,
    pub preview_container: Group,
    pub status_frame: Frame,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub show_linenumbers: bool,
    pub word_wrap: bool,
    page_view: Rc<RefCell<PageView>>,
    /// Browser windows opened this session; dropping one closes it.
    preview_windows: Vec<Rc<RefCell<FileTarget>>>,
    next_window_index: usize,
}

impl AppState {
    pub fn new(widgets: MainWidgets, sender: Sender<Message>, settings: AppSettings, persisted: &PersistedState) -> Self {
        let MainWidgets {
            wind,
            menu,
            text_editor,
            preview_container,
            page_view,
            status_frame,
            ..
        } = widgets;

        let mut controller = PageController::new(
            persisted.config_or_default(),
            persisted.user_content(),
            settings.buffer_policy(),
            settings.preview_settings(),
        );

        let mut surface = FltkSurface::new(&text_editor, sender, Font::Courier, settings.font_size as i32);
        surface.install_guard(controller.guard(), sender);
        controller.present(&mut surface);

        let page_view = Rc::new(RefCell::new(PageView::new(page_view)));
        let handle: TargetHandle = page_view.clone();
        controller.attach_target(&handle);

        let mut state = Self {
            controller,
            surface,
            window: wind,
            menu,
            preview_container,
            status_frame,
            sender,
            show_linenumbers: settings.line_numbers_enabled,
            word_wrap: settings.word_wrap_enabled,
            settings,
            page_view,
            preview_windows: Vec::new(),
            next_window_index: 1,
        };
        state.apply_word_wrap();
        state.update_linenumber_width();
        state.update_window_title();
        state
    }

    // --- Editing ---

    fn schedule_settle(&self, delay: Duration) {
        let s = self.sender;
        fltk::app::add_timeout3(delay.as_secs_f64(), move |_| {
            s.send(Message::Settle);
        });
    }

    pub fn buffer_changed(&mut self) {
        if let Some(delay) = self.controller.buffer_changed(&self.surface) {
            self.schedule_settle(delay);
        }
        self.update_linenumber_width();
    }

    pub fn ensure_editable(&mut self) {
        self.controller.ensure_editable(&mut self.surface);
    }

    pub fn settle(&mut self) {
        self.controller.settle(&mut self.surface);
    }

    // --- Page ---

    pub fn set_framework(&mut self, framework: Framework) {
        if let Some(delay) = self.controller.set_framework(framework, &mut self.surface) {
            self.schedule_settle(delay);
        }
        self.after_configuration_change();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if let Some(delay) = self.controller.set_orientation(orientation, &mut self.surface) {
            self.schedule_settle(delay);
        }
        self.after_configuration_change();
    }

    fn after_configuration_change(&mut self) {
        let config = self.controller.config();
        self.select_radio_item(&framework_menu_path(config.framework));
        self.select_radio_item(&orientation_menu_path(config.orientation));
        self.update_window_title();
        self.update_linenumber_width();
        self.layout_page();
    }

    pub fn update_window_title(&mut self) {
        let config = self.controller.config();
        self.window.set_label(&format!(
            "PagePad - {} - A4 {}",
            config.framework.display_name(),
            config.orientation
        ));
    }

    // --- Preview ---

    pub fn container_resized(&mut self, w: i32, h: i32) {
        self.controller.resize_container(ContainerSize::new(w as f64, h as f64));
        self.layout_page();
    }

    /// Center the scaled page box in the preview container.
    pub fn layout_page(&mut self) {
        let (w, h) = self.controller.preview().scaled_page_size();
        let g = &self.preview_container;
        let x = g.x() + ((g.w() - w) / 2).max(0);
        let y = g.y() + ((g.h() - h) / 2).max(0);
        let scale = self.controller.preview().scale();
        self.page_view.borrow_mut().place(x, y, w, h, scale);
        self.status_frame.set_label(&format!("  {}", self.controller.preview().label()));
        self.preview_container.redraw();
        self.window.redraw();
    }

    pub fn zoom_in(&mut self) {
        self.controller.zoom_in();
        self.layout_page();
    }

    pub fn zoom_out(&mut self) {
        self.controller.zoom_out();
        self.layout_page();
    }

    pub fn reset_zoom(&mut self) {
        self.controller.reset_zoom();
        self.layout_page();
    }

    pub fn open_preview_window(&mut self) {
        let index = self.next_window_index;
        self.next_window_index += 1;

        let target = match FileTarget::new(&preview_dir(), index, self.settings.auto_refresh_secs) {
            Ok(target) => Rc::new(RefCell::new(target)),
            Err(e) => {
                dialog::alert_default(&format!("Failed to create preview window: {}", e));
                return;
            }
        };
        let handle: TargetHandle = target.clone();
        if !self.controller.attach_target(&handle) {
            dialog::alert_default("Failed to write the preview page");
            return;
        }

        let opened = target.borrow().open_in_browser();
        if let Err(e) = opened {
            dialog::alert_default(&format!("Failed to open preview window: {}", e));
            return;
        }
        self.preview_windows.push(target);
    }

    pub fn close_preview_windows(&mut self) {
        for target in self.preview_windows.drain(..) {
            target.borrow_mut().close();
        }
        self.controller.publish();
    }

    pub fn refresh_preview(&mut self) {
        let delivered = self.controller.publish();
        tracing::debug!(delivered, "preview refreshed");
    }

    // --- File ---

    pub fn export_html(&mut self) {
        let default_name = default_export_name(self.controller.config());
        let Some(path) = native_export_dialog(&default_name) else {
            return;
        };
        let document = self.controller.current_assembled_document();
        if let Err(e) = export_document(std::path::Path::new(&path), &document) {
            dialog::alert_default(&format!("Error exporting file: {}", e));
        }
    }

    /// Persist configuration and content, then tear down preview files.
    /// Returns true if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        let state = PersistedState::capture(self.controller.config(), self.controller.user_content());
        if let Err(e) = state.save() {
            tracing::warn!(error = %e, "failed to persist page state");
        }
        self.preview_windows.clear();
        cleanup_preview_dir();
        true
    }

    // --- View ---

    pub fn update_linenumber_width(&mut self) {
        let editor = self.surface.editor_mut();
        if !self.show_linenumbers {
            editor.set_linenumber_width(0);
            return;
        }
        let line_count = self.surface.line_count();
        let digits = ((line_count + 1) as f64).log10().floor() as i32 + 1;
        let width = (digits * 8 + 16).max(40);
        self.surface.editor_mut().set_linenumber_width(width);
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_linenumbers = !self.show_linenumbers;
        self.settings.line_numbers_enabled = self.show_linenumbers;
        let _ = self.settings.save();
        self.update_linenumber_width();
        self.surface.editor_mut().redraw();
    }

    fn apply_word_wrap(&mut self) {
        let editor = self.surface.editor_mut();
        if self.word_wrap {
            editor.wrap_mode(WrapMode::AtBounds, 0);
        } else {
            editor.wrap_mode(WrapMode::None, 0);
        }
        editor.redraw();
    }

    pub fn toggle_word_wrap(&mut self) {
        self.word_wrap = !self.word_wrap;
        self.settings.word_wrap_enabled = self.word_wrap;
        let _ = self.settings.save();
        self.apply_word_wrap();
    }

    fn select_radio_item(&self, path: &str) {
        let idx = self.menu.find_index(path);
        if idx >= 0 {
            if let Some(mut item) = self.menu.at(idx) {
                item.setonly();
            }
        }
    }
}
