use fltk::dialog;

/// Save dialog for an HTML export, starting at `default_name`.
pub fn native_export_dialog(default_name: &str) -> Option<String> {
    dialog::file_chooser("Export HTML", "*.{html,htm}", default_name, false)
}
