//! Editor camera: screen/world transforms and eased pan/zoom
//!
//! The camera is orthographic. Screen space has its origin at the top-left
//! of the viewport with y pointing down; world space has y pointing up.
//! Input sets *targets* (pan delta, scroll) and [`Camera::update`] eases the
//! current position and zoom toward them every frame.

use crate::RectI;
use glam::Vec2;

/// Soft limits on where the camera center may travel
pub const CAMERA_MIN: Vec2 = Vec2::new(-2000.0, -2000.0);
pub const CAMERA_MAX: Vec2 = Vec2::new(2000.0, 2000.0);
pub const ZOOM_MIN: f32 = 0.05;
pub const ZOOM_MAX: f32 = 5.0;
pub const PAN_SPEED: f32 = 6.0;
pub const ZOOM_SPEED: f32 = 2.0;
pub const DEFAULT_ZOOM: f32 = 2.0;
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Horizontal screen offset applied by [`Camera::reset`] so the origin isn't hidden by the sidebar
const RESET_SIDEBAR_OFFSET: f32 = 50.0;
/// World-space margin kept around a level when framing it
const CENTER_ON_MARGIN: f32 = 50.0;

/// Exponential ease-out with base 2, normalised so that `exp_out(p, 1.0) == 1.0`
pub fn exp_out(power: f32, alpha: f32) -> f32 {
    let a = alpha.clamp(0.0, 1.0);
    let min = 2f32.powf(-power);
    let scale = 1.0 / (1.0 - min);
    1.0 - (2f32.powf(-power * a) - min) * scale
}

/// Move `current` toward `target` along an exp-out curve of the given power
pub fn lerp_exp(current: f32, target: f32, power: f32, alpha: f32) -> f32 {
    current + (target - current) * exp_out(power, alpha)
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    target_position: Vec2,
    target_zoom: f32,
    viewport: Vec2,
    effective_viewport: Vec2,
    pub pan_enabled: bool,
    pub zoom_enabled: bool,
    /// Set while a pan gesture is in progress
    pub panning: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            target_position: Vec2::ZERO,
            target_zoom: DEFAULT_ZOOM,
            viewport,
            effective_viewport: viewport * DEFAULT_ZOOM,
            pan_enabled: true,
            zoom_enabled: true,
            panning: false,
        };
        camera.reset();
        camera
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Logical viewport size scaled by the current zoom
    pub fn effective_viewport(&self) -> Vec2 {
        self.effective_viewport
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    pub fn set_target_position(&mut self, position: Vec2) {
        self.target_position = position;
    }

    pub fn set_target_zoom(&mut self, zoom: f32) {
        self.target_zoom = zoom;
    }

    /// Called when the window (or the canvas area) changes size
    pub fn set_viewport(&mut self, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        self.viewport = viewport;
        self.effective_viewport = viewport * self.zoom;
    }

    /// Restore the default zoom and framing, dropping any pending targets
    pub fn reset(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.effective_viewport = self.viewport * self.zoom;
        self.position = Vec2::new(
            self.viewport.x / 2.0 - self.effective_viewport.x / 2.0 - RESET_SIDEBAR_OFFSET,
            self.viewport.y / 2.0 - self.effective_viewport.y / 2.0,
        );
        self.target_zoom = self.zoom;
        self.target_position = self.position;
        self.panning = false;
    }

    pub fn update(&mut self, dt: f32) {
        self.target_zoom = self.target_zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self.zoom = lerp_exp(self.zoom, self.target_zoom, 10.0, ZOOM_SPEED * dt);
        self.effective_viewport = self.viewport * self.zoom;

        self.position.x = lerp_exp(
            self.position.x,
            self.target_position.x,
            5.0,
            PAN_SPEED * dt,
        );
        self.position.y = lerp_exp(
            self.position.y,
            self.target_position.y,
            5.0,
            PAN_SPEED * dt,
        );

        self.clamp_position();
    }

    /// Keep the visible area inside the world limits, using the current zoom
    fn clamp_position(&mut self) {
        let half = self.effective_viewport / 2.0;
        let min = CAMERA_MIN + half;
        let max = CAMERA_MAX - half;

        if max.x > min.x {
            self.position.x = self.position.x.clamp(min.x, max.x);
        } else {
            self.position.x = (CAMERA_MIN.x + CAMERA_MAX.x) / 2.0;
        }

        if max.y > min.y {
            self.position.y = self.position.y.clamp(min.y, max.y);
        } else {
            self.position.y = (CAMERA_MIN.y + CAMERA_MAX.y) / 2.0;
        }
    }

    /// Screen pixel (origin top-left, y down) to world position
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            self.position.x + (screen.x - self.viewport.x / 2.0) * self.zoom,
            self.position.y + (self.viewport.y / 2.0 - screen.y) * self.zoom,
        )
    }

    /// World position to screen pixel, the inverse of [`Camera::unproject`]
    pub fn project(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            (world.x - self.position.x) / self.zoom + self.viewport.x / 2.0,
            self.viewport.y / 2.0 - (world.y - self.position.y) / self.zoom,
        )
    }

    /// Aim the camera so `bounds` fills the view, leaving room for a
    /// `reserved_screen_margin` pixel wide panel on the left edge.
    pub fn center_on(&mut self, bounds: RectI, reserved_screen_margin: f32) {
        let margin_left = self.unproject(Vec2::ZERO).x;
        let margin_right = self.unproject(Vec2::new(reserved_screen_margin, 0.0)).x;
        let margin_world = (margin_right - margin_left).trunc();

        let desired = Vec2::new(
            bounds.w as f32 + 2.0 * CENTER_ON_MARGIN + margin_world,
            bounds.h as f32 + 2.0 * CENTER_ON_MARGIN,
        );

        let zoom_x = desired.x / self.viewport.x;
        let zoom_y = desired.y / self.viewport.y;
        self.target_zoom = zoom_x.max(zoom_y);

        let center = bounds.center();
        self.target_position = Vec2::new(center.x - margin_world / 2.0, center.y);
    }

    /// Drag the view by a screen-space delta
    pub fn pan(&mut self, screen_delta: Vec2) -> bool {
        if !self.pan_enabled {
            return false;
        }
        let scale = if self.zoom < 0.6 { 0.3 } else { 1.0 };
        self.target_position = Vec2::new(
            self.position.x - scale * screen_delta.x,
            self.position.y + scale * screen_delta.y,
        );
        self.panning = true;
        true
    }

    pub fn pan_stop(&mut self) {
        self.panning = false;
    }

    /// Adjust the zoom target by one scroll notch; `slow` gives fine steps
    pub fn scroll(&mut self, amount: f32, slow: bool) -> bool {
        if !self.zoom_enabled || amount == 0.0 {
            return false;
        }
        let is_close = (ZOOM_MIN..=2.0).contains(&self.zoom);
        let step = if is_close || slow { 0.1 } else { 1.0 };
        self.target_zoom += amount.signum() * step;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_exp_out_endpoints() {
        assert!(approx(exp_out(10.0, 0.0), 0.0));
        assert!(approx(exp_out(10.0, 1.0), 1.0));
        assert!(approx(exp_out(5.0, 4.0), 1.0));
        assert!(exp_out(5.0, 0.5) > 0.5);
    }

    #[test]
    fn test_unproject_project_inverse() {
        let mut camera = Camera::default();
        camera.position = Vec2::new(100.0, -50.0);
        camera.zoom = 1.5;
        let screen = Vec2::new(320.0, 200.0);
        let world = camera.unproject(screen);
        let back = camera.project(world);
        assert!(approx(back.x, screen.x) && approx(back.y, screen.y));
    }

    #[test]
    fn test_unproject_viewport_center_is_position() {
        let mut camera = Camera::default();
        camera.position = Vec2::new(10.0, 20.0);
        let world = camera.unproject(camera.viewport() / 2.0);
        assert!(approx(world.x, 10.0) && approx(world.y, 20.0));
    }

    #[test]
    fn test_screen_y_points_down() {
        let camera = Camera::default();
        let top = camera.unproject(Vec2::new(0.0, 0.0));
        let bottom = camera.unproject(Vec2::new(0.0, 100.0));
        assert!(top.y > bottom.y);
    }

    #[test]
    fn test_update_eases_toward_target() {
        let mut camera = Camera::default();
        camera.position = Vec2::ZERO;
        camera.zoom = 1.0;
        camera.set_target_zoom(1.0);
        camera.set_target_position(Vec2::new(100.0, 0.0));
        camera.update(1.0 / 60.0);
        assert!(camera.position.x > 0.0 && camera.position.x < 100.0);
        for _ in 0..120 {
            camera.update(1.0 / 60.0);
        }
        assert!(approx(camera.position.x, 100.0));
    }

    #[test]
    fn test_update_clamps_target_zoom() {
        let mut camera = Camera::default();
        camera.set_target_zoom(100.0);
        camera.update(1.0);
        assert!(approx(camera.target_zoom(), ZOOM_MAX));
        assert!(camera.zoom <= ZOOM_MAX + 1e-3);
    }

    #[test]
    fn test_clamp_tracks_zoom() {
        let mut camera = Camera::new(Vec2::new(400.0, 400.0));
        camera.zoom = 1.0;
        camera.set_target_zoom(1.0);
        camera.position = Vec2::new(5000.0, 0.0);
        camera.set_target_position(Vec2::new(5000.0, 0.0));
        camera.update(0.0);
        assert!(approx(camera.position.x, CAMERA_MAX.x - 200.0));
    }

    #[test]
    fn test_reset_clears_targets() {
        let mut camera = Camera::default();
        camera.set_target_zoom(4.0);
        camera.set_target_position(Vec2::new(999.0, 999.0));
        camera.panning = true;
        camera.reset();
        assert!(approx(camera.zoom, DEFAULT_ZOOM));
        assert_eq!(camera.target_position(), camera.position);
        assert!(approx(camera.target_zoom(), DEFAULT_ZOOM));
        assert!(!camera.panning);
    }

    #[test]
    fn test_center_on_frames_bounds() {
        let mut camera = Camera::new(Vec2::new(1000.0, 500.0));
        camera.zoom = 1.0;
        camera.center_on(RectI::new(0, 0, 400, 200), 0.0);
        // (400 + 100) / 1000 vs (200 + 100) / 500
        assert!(approx(camera.target_zoom(), 0.6));
        assert_eq!(camera.target_position(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_center_on_shifts_for_reserved_margin() {
        let mut camera = Camera::new(Vec2::new(1000.0, 500.0));
        camera.zoom = 1.0;
        camera.center_on(RectI::new(0, 0, 400, 200), 100.0);
        assert!(approx(camera.target_position().x, 150.0));
        assert!(approx(camera.target_zoom(), 0.6));
    }

    #[test]
    fn test_pan_and_scroll_respect_enable_flags() {
        let mut camera = Camera::default();
        camera.pan_enabled = false;
        camera.zoom_enabled = false;
        let before = camera.target_position();
        assert!(!camera.pan(Vec2::new(10.0, 10.0)));
        assert!(!camera.scroll(1.0, false));
        assert_eq!(camera.target_position(), before);
        assert!(approx(camera.target_zoom(), DEFAULT_ZOOM));

        camera.pan_enabled = true;
        camera.zoom_enabled = true;
        assert!(camera.pan(Vec2::new(10.0, 10.0)));
        assert!(camera.panning);
        assert!(camera.scroll(1.0, false));
        assert!(approx(camera.target_zoom(), DEFAULT_ZOOM + 0.1));
    }
}
