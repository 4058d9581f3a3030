use fltk::{app, prelude::*};
use tracing_subscriber::EnvFilter;

use page_pad::app::domain::messages::Message;
use page_pad::app::state::AppState;
use page_pad::app::{AppSettings, PersistedState};
use page_pad::ui::main_window::build_main_window;
use page_pad::ui::menu::build_menu;

fn init_logging() {
    let filter = EnvFilter::try_from_env("PAGEPAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_logging();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let persisted = PersistedState::load();

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender, &settings, persisted.config_or_default());

    let mut state = AppState::new(widgets, sender, settings, &persisted);
    state.window.show();
    let (w, h) = (state.preview_container.w(), state.preview_container.h());
    state.container_resized(w, h);

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::BufferChanged => state.buffer_changed(),
                Message::EnsureEditable => state.ensure_editable(),
                Message::Settle => state.settle(),

                Message::SetFramework(framework) => state.set_framework(framework),
                Message::SetOrientation(orientation) => state.set_orientation(orientation),

                Message::ContainerResized(w, h) => state.container_resized(w, h),
                Message::ZoomIn => state.zoom_in(),
                Message::ZoomOut => state.zoom_out(),
                Message::ZoomReset => state.reset_zoom(),
                Message::OpenPreviewWindow => state.open_preview_window(),
                Message::ClosePreviewWindows => state.close_preview_windows(),
                Message::RefreshPreview => state.refresh_preview(),

                Message::ToggleLineNumbers => state.toggle_line_numbers(),
                Message::ToggleWordWrap => state.toggle_word_wrap(),

                Message::ExportHtml => state.export_html(),
                Message::FileQuit => {
                    if state.file_quit() {
                        app.quit();
                    }
                }
            }
        }
    }
}
