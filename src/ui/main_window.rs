use fltk::{
    app::Sender,
    enums::{Align, Color, FrameType},
    frame::Frame,
    group::{Flex, Group},
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::TextEditor,
    window::Window,
};

use crate::app::domain::messages::Message;

pub const STATUS_BAR_HEIGHT: i32 = 24;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub text_editor: TextEditor,
    /// Grey area the scaled page sits in; its size drives the fit scale.
    pub preview_container: Group,
    pub page_view: HelpView,
    pub status_frame: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1200, 800, "PagePad");
    wind.set_xclass("PagePad");

    let mut flex = Flex::new(0, 0, 1200, 800, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut row = Flex::default();
    row.set_type(fltk::group::FlexType::Row);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
    text_editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));

    let mut preview_container = Group::default();
    preview_container.set_frame(FrameType::FlatBox);
    preview_container.set_color(Color::from_rgb(200, 200, 200));
    let mut page_view = HelpView::default().with_size(400, 560);
    page_view.set_frame(FrameType::FlatBox);
    preview_container.end();
    preview_container.make_resizable(false);

    row.end();

    let mut status_frame = Frame::default();
    status_frame.set_frame(FrameType::FlatBox);
    status_frame.set_color(Color::from_rgb(235, 235, 235));
    status_frame.set_label_size(12);
    status_frame.set_align(Align::Left | Align::Inside);
    flex.fixed(&status_frame, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    let s = *sender;
    preview_container.resize_callback(move |_, _, _, w, h| {
        s.send(Message::ContainerResized(w, h));
    });

    let s = *sender;
    wind.set_callback(move |_| {
        if fltk::app::event() == fltk::enums::Event::Close {
            s.send(Message::FileQuit);
        }
    });

    MainWidgets {
        wind,
        flex,
        menu,
        text_editor,
        preview_container,
        page_view,
        status_frame,
    }
}
