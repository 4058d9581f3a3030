//! Preview synchronizer: page scaling and fan-out of the preview document
//! to every open render target.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::app::domain::config::Orientation;
use crate::app::infrastructure::error::Result;

/// Something that displays a preview document: the embedded view, a
/// secondary window, a browser file.
pub trait RenderTarget {
    /// Short label for logs.
    fn name(&self) -> String;

    fn is_open(&self) -> bool;

    /// Show `document`. An error means the target is gone for good.
    fn render(&mut self, document: &str) -> Result<()>;
}

/// Shared handle to a render target, as held by its owner.
pub type TargetHandle = Rc<RefCell<dyn RenderTarget>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    /// Space kept free around the page inside the container, in pixels.
    pub container_padding: f64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 2.0,
            zoom_step: 0.1,
            container_padding: 32.0,
        }
    }
}

impl PreviewSettings {
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Largest scale at which the A4 page box fits the container, clamped to
/// the settings' range.
pub fn compute_scale(container: ContainerSize, orientation: Orientation, settings: &PreviewSettings) -> f64 {
    let (page_width, page_height) = orientation.page_size_px();
    let width = (container.width - settings.container_padding).max(0.0);
    let height = (container.height - settings.container_padding).max(0.0);
    let fit = (width / page_width as f64).min(height / page_height as f64);
    settings.clamp(fit)
}

/// `"A4 portrait • 210×297mm • 60%"`
pub fn page_label(orientation: Orientation, scale: f64) -> String {
    let (w, h) = orientation.dimensions_mm();
    format!(
        "A4 {} \u{2022} {}\u{d7}{}mm \u{2022} {}%",
        orientation.name(),
        w,
        h,
        (scale * 100.0).round() as i64
    )
}

pub struct PreviewSynchronizer {
    settings: PreviewSettings,
    orientation: Orientation,
    container: Option<ContainerSize>,
    fit_scale: f64,
    /// Manual zoom; overrides the fit value until reset.
    zoom: Option<f64>,
    targets: Vec<Weak<RefCell<dyn RenderTarget>>>,
}

impl PreviewSynchronizer {
    pub fn new(settings: PreviewSettings, orientation: Orientation) -> Self {
        let fit_scale = settings.clamp(0.6);
        Self {
            settings,
            orientation,
            container: None,
            fit_scale,
            zoom: None,
            targets: Vec::new(),
        }
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Scale currently shown: the manual zoom if any, else the fit value.
    pub fn scale(&self) -> f64 {
        self.zoom.unwrap_or(self.fit_scale)
    }

    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom.is_some()
    }

    /// Scaled page box `(width, height)` in pixels.
    pub fn scaled_page_size(&self) -> (i32, i32) {
        let (w, h) = self.orientation.page_size_px();
        let scale = self.scale();
        ((w as f64 * scale).round() as i32, (h as f64 * scale).round() as i32)
    }

    pub fn label(&self) -> String {
        page_label(self.orientation, self.scale())
    }

    fn refit(&mut self) {
        if let Some(container) = self.container {
            self.fit_scale = compute_scale(container, self.orientation, &self.settings);
            trace!(scale = self.fit_scale, orientation = %self.orientation, "fit scale recomputed");
        }
    }

    pub fn resize(&mut self, container: ContainerSize) {
        self.container = Some(container);
        self.refit();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.refit();
    }

    pub fn zoom_in(&mut self) -> f64 {
        let scale = self.settings.clamp(self.scale() + self.settings.zoom_step);
        self.zoom = Some(scale);
        scale
    }

    pub fn zoom_out(&mut self) -> f64 {
        let scale = self.settings.clamp(self.scale() - self.settings.zoom_step);
        self.zoom = Some(scale);
        scale
    }

    /// Drop the manual zoom and go back to the fit value.
    pub fn reset_zoom(&mut self) -> f64 {
        self.zoom = None;
        self.refit();
        self.fit_scale
    }

    /// Register a target and bring it up to date with `document` at once.
    /// The synchronizer only holds a weak reference; dropping the last
    /// strong handle unregisters the target. Returns false when the first
    /// render failed and the target was left out.
    pub fn attach(&mut self, target: &TargetHandle, document: &str) -> bool {
        let delivered = match target.try_borrow_mut() {
            Ok(mut t) => t.render(document).is_ok(),
            Err(_) => true,
        };
        if delivered {
            self.targets.push(Rc::downgrade(target));
        } else {
            debug!("render target failed on attach, not registered");
        }
        delivered
    }

    pub fn target_count(&self) -> usize {
        self.targets.iter().filter(|t| t.strong_count() > 0).count()
    }

    /// Push `document` to every live target. Dropped, closed or failing
    /// targets are pruned and never retried. Returns how many targets
    /// received the document.
    pub fn publish(&mut self, document: &str) -> usize {
        let mut delivered = 0;
        self.targets.retain(|weak| {
            let Some(target) = weak.upgrade() else {
                trace!("render target dropped, pruned");
                return false;
            };
            // A target busy further up the stack keeps its slot.
            let Ok(mut target) = target.try_borrow_mut() else {
                return true;
            };
            if !target.is_open() {
                debug!(target = %target.name(), "render target closed, pruned");
                return false;
            }
            match target.render(document) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(e) => {
                    debug!(target = %target.name(), error = %e, "render target unavailable, pruned");
                    false
                }
            }
        });
        delivered
    }
}
