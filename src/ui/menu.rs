use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::config::{Framework, Orientation, PageConfig};
use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;

pub fn framework_menu_path(framework: Framework) -> String {
    format!("Page/Framework/{}", framework.display_name())
}

pub fn orientation_menu_path(orientation: Orientation) -> String {
    match orientation {
        Orientation::Portrait => "Page/Orientation/Portrait".to_string(),
        Orientation::Landscape => "Page/Orientation/Landscape".to_string(),
    }
}

fn radio_flag(checked: bool) -> MenuFlag {
    if checked { MenuFlag::Radio | MenuFlag::Value } else { MenuFlag::Radio }
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings, config: PageConfig) {
    let s = sender;

    // File
    menu.add("File/Export HTML...", Shortcut::Ctrl | 'e', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ExportHtml) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Page
    for &framework in Framework::all() {
        let flag = radio_flag(framework == config.framework);
        menu.add(&framework_menu_path(framework), Shortcut::None, flag, { let s = *s; move |_| s.send(Message::SetFramework(framework)) });
    }
    for &orientation in Orientation::all() {
        let flag = radio_flag(orientation == config.orientation);
        menu.add(&orientation_menu_path(orientation), Shortcut::None, flag, { let s = *s; move |_| s.send(Message::SetOrientation(orientation)) });
    }

    // View
    menu.add("View/Zoom In", Shortcut::Ctrl | '=', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ZoomIn) });
    menu.add("View/Zoom Out", Shortcut::Ctrl | '-', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ZoomOut) });
    menu.add("View/Fit Page", Shortcut::Ctrl | '0', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ZoomReset) });
    let ln_flag = if settings.line_numbers_enabled { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Line Numbers", Shortcut::None, ln_flag, { let s = *s; move |_| s.send(Message::ToggleLineNumbers) });
    let ww_flag = if settings.word_wrap_enabled { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Word Wrap", Shortcut::None, ww_flag, { let s = *s; move |_| s.send(Message::ToggleWordWrap) });

    // Preview
    menu.add("Preview/Open in New Window", Shortcut::Ctrl | 'm', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenPreviewWindow) });
    menu.add("Preview/Refresh", Shortcut::from_key(fltk::enums::Key::F5), MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RefreshPreview) });
    menu.add("Preview/Close Preview Windows", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ClosePreviewWindows) });
}
