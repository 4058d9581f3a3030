pub mod editor_surface;
pub mod file_dialogs;
pub mod html_view;
pub mod main_window;
pub mod menu;
