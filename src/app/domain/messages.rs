use super::config::{Framework, Orientation};

/// All messages that can be sent through the FLTK channel.
/// Each menu callback or widget handler sends one of these; the dispatch
/// loop in main handles them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    // File
    ExportHtml,
    FileQuit,

    // Editor
    BufferChanged,
    /// A blocked key press or a click landed in the protected lines.
    EnsureEditable,
    /// Deferred steps are due.
    Settle,

    // Page
    SetFramework(Framework),
    SetOrientation(Orientation),

    // Preview
    ContainerResized(i32, i32),
    ZoomIn,
    ZoomOut,
    ZoomReset,
    OpenPreviewWindow,
    ClosePreviewWindows,
    RefreshPreview,

    // View
    ToggleLineNumbers,
    ToggleWordWrap,
}
