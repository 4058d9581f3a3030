//! Full-flow scenarios driven through an in-memory editing surface.

use std::cell::RefCell;
use std::rc::Rc;

use page_pad::app::controllers::buffer::{BufferPolicy, DEFAULT_PLACEHOLDER};
use page_pad::app::controllers::page::PageController;
use page_pad::app::controllers::preview::{PreviewSettings, TargetHandle};
use page_pad::app::controllers::surface::MemorySurface;
use page_pad::app::domain::caret::Caret;
use page_pad::app::domain::config::{Framework, Orientation, PageConfig};
use page_pad::app::infrastructure::file_target::FileTarget;
use page_pad::app::services::session::PersistedState;
use page_pad::app::services::text_ops::line_count;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn start(config: PageConfig, content: Option<&str>) -> (PageController, MemorySurface) {
    init_logging();
    let mut controller = PageController::new(config, content, BufferPolicy::default(), PreviewSettings::default());
    let mut surface = MemorySurface::new();
    controller.present(&mut surface);
    (controller, surface)
}

#[test]
fn typed_heading_lands_in_assembled_document() {
    let (mut controller, mut surface) = start(PageConfig::new(Framework::Tailwind, Orientation::Portrait), None);

    let text = format!("{}\n<h1>Hi</h1>", controller.buffer().prefix());
    surface.type_over(&text);
    controller.buffer_changed(&surface);

    let document = controller.current_assembled_document();
    assert!(document.contains("size: A4 portrait"));
    assert!(document.contains("cdn.tailwindcss.com"));
    assert!(document.contains("<h1>Hi</h1>\n</body>\n</html>"));
}

#[test]
fn content_survives_framework_and_orientation_switch() {
    let (mut controller, mut surface) =
        start(PageConfig::new(Framework::Tailwind, Orientation::Portrait), Some("<p>Keep me</p>"));

    controller.configuration_changed(PageConfig::new(Framework::Bootstrap, Orientation::Landscape), &mut surface);
    controller.settle(&mut surface);

    let document = controller.current_assembled_document();
    assert!(document.contains("bootstrap"));
    assert!(!document.contains("tailwindcss"));
    assert!(document.contains("size: A4 landscape"));
    assert!(document.contains("<p>Keep me</p>"));
    assert_eq!(controller.user_content(), "<p>Keep me</p>");
    assert_eq!(surface.decorated, Some(controller.buffer().protected_range()));
}

#[test]
fn select_all_delete_restores_prefix_and_placeholder() {
    let (mut controller, mut surface) = start(PageConfig::default(), Some("<p>gone</p>"));
    let protected = controller.buffer().protected_lines();

    surface.type_over("");
    controller.buffer_changed(&surface);
    controller.settle(&mut surface);

    assert!(surface.text.starts_with(controller.buffer().prefix()));
    assert_eq!(line_count(&surface.text), protected + 1);
    assert!(surface.text.ends_with(DEFAULT_PLACEHOLDER));
    assert_eq!(surface.caret, Caret::line_start(protected + 1));
}

#[test]
fn browser_window_follows_edits_until_closed() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut surface) = start(PageConfig::default(), Some("<p>v1</p>"));

    let window = Rc::new(RefCell::new(FileTarget::new(dir.path(), 1, 0).unwrap()));
    let handle: TargetHandle = window.clone();
    assert!(controller.attach_target(&handle));
    let path = window.borrow().path().to_path_buf();
    assert!(std::fs::read_to_string(&path).unwrap().contains("<p>v1</p>"));

    let text = format!("{}\n<p>v2</p>", controller.buffer().prefix());
    surface.type_over(&text);
    controller.buffer_changed(&surface);
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<p>v2</p>"));
    assert!(written.contains("::-webkit-scrollbar"), "windows get the isolated preview");

    window.borrow_mut().close();
    assert_eq!(controller.publish(), 0);
    assert_eq!(controller.preview().target_count(), 0);
}

#[test]
fn unwritable_browser_window_is_not_attached() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, _surface) = start(PageConfig::default(), Some("<p>v1</p>"));

    let preview_dir = dir.path().join("preview");
    let window = Rc::new(RefCell::new(FileTarget::new(&preview_dir, 1, 0).unwrap()));
    std::fs::remove_dir_all(&preview_dir).unwrap();

    let handle: TargetHandle = window.clone();
    assert!(!controller.attach_target(&handle));
    assert_eq!(controller.preview().target_count(), 0);
    assert!(!window.borrow().path().exists());
}

#[test]
fn session_round_trips_through_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let config = PageConfig::new(Framework::Bootstrap, Orientation::Landscape);
    let (controller, _surface) = start(config, Some("<main>saved</main>"));

    PersistedState::capture(controller.config(), controller.user_content())
        .save_to(&path)
        .unwrap();

    let restored = PersistedState::load_from(&path);
    let (controller, _surface) = start(restored.config_or_default(), restored.user_content());
    assert_eq!(controller.config(), config);
    assert_eq!(controller.user_content(), "<main>saved</main>");
}
