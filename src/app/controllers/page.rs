//! Page controller: ties the protected buffer, the document assembler and
//! the preview synchronizer together. Events flow one way, from edits and
//! configuration changes through the buffer to the render targets.

use std::time::Duration;

use tracing::debug;

use super::buffer::{BoundaryGuard, BufferPolicy, EditOutcome, ProtectedBuffer, Recovery};
use super::deferred::{DeferredQueue, RECOVERY_DELAY, REGENERATION_DELAY};
use super::preview::{ContainerSize, PreviewSettings, PreviewSynchronizer, TargetHandle};
use super::surface::EditingSurface;
use crate::app::domain::caret::Caret;
use crate::app::domain::config::{Framework, Orientation, PageConfig};
use crate::app::services::assembler::{assemble, isolate_for_preview};
use crate::app::services::templates::generate_closing;

/// Surface work that waits until the triggering change has fully landed.
#[derive(Debug, Clone, PartialEq)]
pub enum SettleTask {
    /// Push a boundary recovery back to the surface.
    Restore(Recovery),
    /// Reapply decorations and caret after a regeneration.
    Reprotect { caret: Caret },
    /// Reapply decorations only; the user has moved on since the regeneration.
    Redecorate,
}

pub struct PageController {
    buffer: ProtectedBuffer,
    preview: PreviewSynchronizer,
    deferred: DeferredQueue<SettleTask>,
}

impl PageController {
    pub fn new(
        config: PageConfig,
        initial_user_text: Option<&str>,
        policy: BufferPolicy,
        preview_settings: PreviewSettings,
    ) -> Self {
        Self {
            buffer: ProtectedBuffer::initialize(config, initial_user_text, policy),
            preview: PreviewSynchronizer::new(preview_settings, config.orientation),
            deferred: DeferredQueue::new(),
        }
    }

    pub fn buffer(&self) -> &ProtectedBuffer {
        &self.buffer
    }

    pub fn preview(&self) -> &PreviewSynchronizer {
        &self.preview
    }

    pub fn config(&self) -> PageConfig {
        self.buffer.config()
    }

    pub fn user_content(&self) -> &str {
        self.buffer.user_content()
    }

    pub fn guard(&self) -> BoundaryGuard {
        self.buffer.guard()
    }

    pub fn has_pending(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Complete document for export: prefix, user content, closing markup.
    pub fn current_assembled_document(&self) -> String {
        assemble(self.buffer.prefix(), self.buffer.user_content(), generate_closing())
    }

    /// Render-ready variant with the page isolation styles.
    pub fn current_preview_document(&self) -> String {
        isolate_for_preview(&self.current_assembled_document(), self.buffer.config().orientation)
    }

    /// Show the buffer on a fresh surface and publish the first preview.
    pub fn present(&mut self, surface: &mut dyn EditingSurface) {
        self.buffer.present(surface);
        self.publish();
    }

    pub fn publish(&mut self) -> usize {
        let document = self.current_preview_document();
        self.preview.publish(&document)
    }

    /// Register `target` and render the current preview into it. False
    /// when that first render failed.
    pub fn attach_target(&mut self, target: &TargetHandle) -> bool {
        let document = self.current_preview_document();
        self.preview.attach(target, &document)
    }

    /// The surface's text changed. Returns the delay after which `settle`
    /// must run, if a step was scheduled.
    ///
    /// A real edit supersedes pending steps. If one was still waiting, the
    /// decorations are owed anyway, but the caret stays where the user put it.
    pub fn buffer_changed(&mut self, surface: &dyn EditingSurface) -> Option<Duration> {
        let text = surface.text();
        let generation = self.buffer.generation();
        let scheduled = match self.buffer.on_buffer_changed(&text) {
            EditOutcome::Accepted if self.buffer.generation() != generation && self.has_pending() => {
                self.deferred
                    .schedule(self.buffer.generation(), SettleTask::Redecorate);
                Some(REGENERATION_DELAY)
            }
            EditOutcome::Accepted => None,
            EditOutcome::Recovered(recovery) => {
                self.deferred
                    .schedule(self.buffer.generation(), SettleTask::Restore(recovery));
                Some(RECOVERY_DELAY)
            }
        };
        self.publish();
        scheduled
    }

    /// Regenerate the prefix for `config`. The new text is applied at once;
    /// decorations and caret follow after the returned delay.
    pub fn configuration_changed(
        &mut self,
        config: PageConfig,
        surface: &mut dyn EditingSurface,
    ) -> Option<Duration> {
        if config == self.buffer.config() {
            return None;
        }
        let regeneration = self.buffer.on_configuration_changed(config, surface.caret());
        self.buffer.apply_regeneration(surface, &regeneration);
        self.deferred.schedule(
            self.buffer.generation(),
            SettleTask::Reprotect {
                caret: regeneration.caret,
            },
        );
        self.preview.set_orientation(config.orientation);
        self.publish();
        Some(REGENERATION_DELAY)
    }

    pub fn set_framework(&mut self, framework: Framework, surface: &mut dyn EditingSurface) -> Option<Duration> {
        let config = self.buffer.config().with_framework(framework);
        self.configuration_changed(config, surface)
    }

    pub fn set_orientation(&mut self, orientation: Orientation, surface: &mut dyn EditingSurface) -> Option<Duration> {
        let config = self.buffer.config().with_orientation(orientation);
        self.configuration_changed(config, surface)
    }

    /// A rejected key press or a pointer action: relocate the caret and
    /// restore an editable line if needed. Applied immediately.
    pub fn ensure_editable(&mut self, surface: &mut dyn EditingSurface) {
        let text = surface.text();
        if let Some(recovery) = self.buffer.ensure_editable(&text, surface.caret()) {
            self.buffer.apply_recovery(surface, &recovery);
            if recovery.text.is_some() {
                self.publish();
            }
        }
    }

    /// Run deferred steps for the current generation. Steps are dropped
    /// when the surface has gone away or a newer generation superseded them.
    pub fn settle(&mut self, surface: &mut dyn EditingSurface) {
        let ready = self.deferred.take_ready(self.buffer.generation());
        if !surface.is_alive() {
            debug!(dropped = ready.len(), "surface gone, deferred steps dropped");
            return;
        }
        for task in ready {
            match task {
                SettleTask::Restore(recovery) => self.buffer.apply_recovery(surface, &recovery),
                SettleTask::Reprotect { caret } => self.buffer.settle_regeneration(surface, caret),
                SettleTask::Redecorate => surface.decorate_protected(self.buffer.protected_range()),
            }
        }
    }

    pub fn resize_container(&mut self, container: ContainerSize) {
        self.preview.resize(container);
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.preview.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.preview.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.preview.reset_zoom()
    }
}
