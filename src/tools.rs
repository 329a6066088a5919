//! Tool state and the stroke renderer.
//!
//! `DrawState` holds the toolbar-controlled brush settings plus the last
//! sampled pointer position of the active drag.  The drag handlers mutate
//! state and bake stroke segments into the surface; none of them need a
//! live window, so everything here is testable against an in-memory
//! buffer.

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

use crate::canvas::CanvasSurface;

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Brush settings plus in-flight drag state.
///
/// `active_color` is preserved while the eraser is on; only the *effect*
/// of a stroke switches to the background color, so toggling the eraser
/// off restores drawing with the prior color.
pub struct DrawState {
    pub active_color: Color32,
    pub brush_size: u32,
    pub eraser_active: bool,
    pub last_pos: Option<Pos2>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            active_color: Color32::BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            eraser_active: false,
            last_pos: None,
        }
    }
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The color a stroke painted right now would use.
    pub fn stroke_color(&self, background: Color32) -> Color32 {
        if self.eraser_active {
            background
        } else {
            self.active_color
        }
    }

    /// Clamped to the slider range, for callers that bypass the slider.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// A color was chosen from the picker: apply it and drop out of
    /// eraser mode.
    pub fn color_picked(&mut self, color: Color32) {
        self.active_color = color;
        self.eraser_active = false;
    }

    pub fn eraser_toggled(&mut self) {
        self.eraser_active = !self.eraser_active;
    }

    /// Drag start: record the pointer position as the segment origin.
    /// Nothing is drawn until the pointer moves.
    pub fn drag_started(&mut self, pos: Pos2) {
        self.last_pos = Some(pos);
    }

    /// Drag move: bake a segment from the last recorded position to `pos`,
    /// then advance the recorded position so consecutive segments join
    /// into a connected polyline.
    pub fn drag_moved(&mut self, surface: &mut CanvasSurface, pos: Pos2) {
        let Some(last) = self.last_pos else {
            // No recorded origin (drag began outside the surface):
            // record and wait for the next move.
            self.last_pos = Some(pos);
            return;
        };
        // The pointer has not moved; a press with no motion draws nothing
        if pos == last {
            return;
        }
        let color = self.stroke_color(surface.background());
        surface.stroke(last, pos, self.brush_size, color);
        self.last_pos = Some(pos);
    }

    pub fn drag_released(&mut self) {
        self.last_pos = None;
    }
}

/// Bake one line segment into `img` with round caps and gap-free joins.
///
/// Round discs are stamped at roughly one-pixel steps along the segment,
/// so fast pointer movement still produces a continuous stroke between
/// the sampled points.
pub(crate) fn stroke_line(img: &mut RgbaImage, start: Pos2, end: Pos2, size: u32, color: Rgba<u8>) {
    let delta = end - start;
    let distance = delta.length();

    if distance < 0.1 {
        // Degenerate segment: a single round dot
        stamp_disc(img, start.x, start.y, size, color);
        return;
    }

    let steps = distance.ceil() as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp_disc(img, start.x + delta.x * t, start.y + delta.y * t, size, color);
    }
}

/// Stamp a filled disc of diameter `size` centered at (`cx`, `cy`).
/// Pixels outside the image are clipped.
fn stamp_disc(img: &mut RgbaImage, cx: f32, cy: f32, size: u32, color: Rgba<u8>) {
    let radius = (size as f32 / 2.0).max(0.5);
    let r2 = radius * radius;

    let w = img.width() as i32;
    let h = img.height() as i32;
    let min_x = ((cx - radius).floor() as i32).max(0);
    let max_x = ((cx + radius).ceil() as i32).min(w - 1);
    let min_y = ((cy - radius).floor() as i32).max(0);
    let max_y = ((cy + radius).ceil() as i32).min(h - 1);

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            // Test against the pixel center
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    // A sub-pixel brush can miss every pixel center; the pixel under the
    // stamp itself is always painted.
    let (ix, iy) = (cx.floor() as i32, cy.floor() as i32);
    if ix >= 0 && ix < w && iy >= 0 && iy < h {
        img.put_pixel(ix as u32, iy as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BACKGROUND, CanvasSurface};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn surface() -> CanvasSurface {
        CanvasSurface::new(64, 48)
    }

    #[test]
    fn drag_start_records_origin_without_drawing() {
        let surf = surface();
        let mut state = DrawState::new();

        state.drag_started(Pos2::new(10.0, 10.0));

        assert_eq!(state.last_pos, Some(Pos2::new(10.0, 10.0)));
        assert!(surf.snapshot().pixels().all(|p| *p == WHITE));

        state.drag_released();
        assert_eq!(state.last_pos, None);
    }

    #[test]
    fn press_without_motion_draws_nothing() {
        let mut surf = surface();
        let mut state = DrawState::new();

        state.drag_started(Pos2::new(20.0, 20.0));
        state.drag_moved(&mut surf, Pos2::new(20.0, 20.0));
        state.drag_released();

        assert!(surf.snapshot().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn polyline_touches_every_sampled_point_in_order() {
        let mut surf = surface();
        let mut state = DrawState::new();

        let points = [
            Pos2::new(10.0, 10.0),
            Pos2::new(40.0, 12.0),
            Pos2::new(38.0, 30.0),
            Pos2::new(5.0, 28.0),
        ];

        state.drag_started(points[0]);
        for p in &points[1..] {
            state.drag_moved(&mut surf, *p);
        }

        let img = surf.snapshot();
        // Every sampled point is painted
        for p in &points {
            assert_eq!(*img.get_pixel(p.x as u32, p.y as u32), BLACK, "point {:?} not painted", p);
        }
        // ...and each pair of consecutive samples is connected: walk each
        // segment and check the stroke is present all the way along it.
        for pair in points.windows(2) {
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                let x = pair[0].x + (pair[1].x - pair[0].x) * t;
                let y = pair[0].y + (pair[1].y - pair[0].y) * t;
                assert_eq!(
                    *img.get_pixel(x as u32, y as u32),
                    BLACK,
                    "gap between {:?} and {:?} at t={}",
                    pair[0],
                    pair[1],
                    t
                );
            }
        }
        // Last recorded position advanced to the final sample
        assert_eq!(state.last_pos, Some(points[3]));
    }

    #[test]
    fn eraser_paints_background_and_preserves_color() {
        let mut surf = surface();
        let mut state = DrawState::new();
        state.color_picked(Color32::RED);
        state.set_brush_size(4);

        state.drag_started(Pos2::new(10.0, 20.0));
        state.drag_moved(&mut surf, Pos2::new(50.0, 20.0));
        state.drag_released();
        assert_eq!(*surf.snapshot().get_pixel(30, 20), Rgba([255, 0, 0, 255]));

        // Eraser on: strokes paint the background color
        state.eraser_toggled();
        assert!(state.eraser_active);
        assert_eq!(state.stroke_color(BACKGROUND), BACKGROUND);
        state.set_brush_size(12);
        state.drag_started(Pos2::new(10.0, 20.0));
        state.drag_moved(&mut surf, Pos2::new(50.0, 20.0));
        state.drag_released();
        assert_eq!(*surf.snapshot().get_pixel(30, 20), WHITE);

        // Eraser off: the original color was preserved, not lost
        state.eraser_toggled();
        assert!(!state.eraser_active);
        assert_eq!(state.active_color, Color32::RED);
        assert_eq!(state.stroke_color(BACKGROUND), Color32::RED);
    }

    #[test]
    fn picking_a_color_deactivates_the_eraser() {
        let mut state = DrawState::new();
        state.eraser_toggled();
        assert!(state.eraser_active);

        state.color_picked(Color32::BLUE);
        assert!(!state.eraser_active);
        assert_eq!(state.active_color, Color32::BLUE);
    }

    #[test]
    fn brush_size_setter_clamps_to_range() {
        let mut state = DrawState::new();
        state.set_brush_size(0);
        assert_eq!(state.brush_size, MIN_BRUSH_SIZE);
        state.set_brush_size(200);
        assert_eq!(state.brush_size, MAX_BRUSH_SIZE);
        state.set_brush_size(25);
        assert_eq!(state.brush_size, 25);
    }

    #[test]
    fn strokes_outside_the_surface_are_clipped() {
        let mut surf = surface();
        let mut state = DrawState::new();

        // Segment entering from outside the top-left corner
        state.drag_started(Pos2::new(-20.0, 5.0));
        state.drag_moved(&mut surf, Pos2::new(30.0, 5.0));
        state.drag_released();
        assert_eq!(*surf.snapshot().get_pixel(10, 5), BLACK);

        // Segment fully outside leaves the surface untouched
        let mut clean = surface();
        state.drag_started(Pos2::new(-50.0, -50.0));
        state.drag_moved(&mut clean, Pos2::new(-10.0, -5.0));
        state.drag_released();
        assert!(clean.snapshot().pixels().all(|p| *p == WHITE));

        // Stamp overlapping the far edge
        state.drag_started(Pos2::new(60.0, 40.0));
        state.drag_moved(&mut surf, Pos2::new(70.0, 40.0));
        state.drag_released();
        assert_eq!(*surf.snapshot().get_pixel(63, 40), BLACK);
    }

    #[test]
    fn degenerate_segment_paints_a_single_dot() {
        let mut img = RgbaImage::from_pixel(32, 32, WHITE);
        stroke_line(
            &mut img,
            Pos2::new(16.0, 16.0),
            Pos2::new(16.0, 16.0),
            4,
            BLACK,
        );
        assert_eq!(*img.get_pixel(16, 16), BLACK);
        assert_eq!(*img.get_pixel(16, 25), WHITE);
    }

    #[test]
    fn width_one_stroke_still_marks_pixels() {
        let mut img = RgbaImage::from_pixel(32, 32, WHITE);
        stroke_line(
            &mut img,
            Pos2::new(4.0, 8.0),
            Pos2::new(20.0, 8.0),
            MIN_BRUSH_SIZE,
            BLACK,
        );
        assert_eq!(*img.get_pixel(10, 8), BLACK);
    }
}
