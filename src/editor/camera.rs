use serde::{Deserialize, Serialize};

use super::{Editor, InteractionState};

/// Screen-space offset plus zoom. `screen = offset + world * zoom`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(50.0, 50.0, 0.8)
    }
}

impl Camera {
    pub const fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self { x, y, zoom }
    }

    pub fn offset(&self) -> egui::Vec2 {
        egui::vec2(self.x, self.y)
    }

    pub fn world_to_screen(&self, world: egui::Pos2) -> egui::Pos2 {
        (self.offset() + world.to_vec2() * self.zoom).to_pos2()
    }

    pub fn screen_to_world(&self, screen: egui::Pos2) -> egui::Pos2 {
        ((screen.to_vec2() - self.offset()) / self.zoom).to_pos2()
    }

    /// Scales zoom by `factor` (clamped) keeping the world point under
    /// `screen_point` fixed on screen.
    pub fn zoom_about_screen_point(
        &mut self,
        screen_point: egui::Pos2,
        factor: f32,
        min_zoom: f32,
        max_zoom: f32,
    ) {
        let before = self.screen_to_world(screen_point);
        let (lo, hi) = (min_zoom.min(max_zoom), max_zoom.max(min_zoom));
        self.zoom = (self.zoom * factor).clamp(lo, hi);
        self.x = screen_point.x - before.x * self.zoom;
        self.y = screen_point.y - before.y * self.zoom;
    }

    pub fn pan_by(&mut self, delta: egui::Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct PanOrigin {
    pub pointer: egui::Pos2,
    pub camera: Camera,
}

impl Editor {
    pub(super) fn start_panning(&mut self, screen: egui::Pos2) {
        if self.interaction != InteractionState::Idle {
            self.ignored("start panning");
            return;
        }
        self.transient.pan = Some(PanOrigin {
            pointer: screen,
            camera: self.camera,
        });
        self.interaction = InteractionState::Panning;
    }

    pub(super) fn panning(&mut self, screen: egui::Pos2) {
        if self.interaction != InteractionState::Panning {
            self.ignored("panning");
            return;
        }
        let Some(origin) = self.transient.pan else {
            return;
        };
        let mut camera = origin.camera;
        camera.pan_by(screen - origin.pointer);
        self.camera = camera;
    }

    pub(super) fn zoom_at(&mut self, screen: egui::Pos2, delta_y: f32) {
        let factor = 1.0 - delta_y * self.settings.wheel_zoom_sensitivity;
        let (min, max) = self.settings.zoom_bounds();
        self.camera.zoom_about_screen_point(screen, factor, min, max);
    }

    pub(super) fn zoom_step(&mut self, zoom_in: bool) {
        let step = self.settings.zoom_step;
        let zoom = if zoom_in {
            self.camera.zoom * step
        } else {
            self.camera.zoom / step
        };
        self.camera.zoom = self.settings.clamp_zoom(zoom);
    }

    pub(super) fn reset_zoom(&mut self) {
        self.camera = self.settings.default_camera;
    }

    pub(super) fn wheel_pan(&mut self, delta: egui::Vec2) {
        self.camera.pan_by(-delta);
    }
}

#[cfg(test)]
#[path = "camera_test.rs"]
mod tests;
