//! Shape helpers shared by the widget styles.

use crate::models::theme::{Color, PanelStyle, Theme, colors};
use crate::render::surface::Surface;

/// Glow in `color` when the theme enables it, otherwise switches glow off.
pub fn apply_glow(surface: &mut dyn Surface, theme: &Theme, color: Color) {
    surface.set_glow(color, theme.glow_blur());
}

pub fn clear_glow(surface: &mut dyn Surface) {
    surface.set_glow(colors::with_alpha(colors::BLACK, 0.0), 0.0);
}

/// Background panel in the theme's panel style.
pub fn draw_panel(surface: &mut dyn Surface, theme: &Theme, x: f32, y: f32, w: f32, h: f32) {
    let c = &theme.colors;
    match theme.effects.panel_style {
        PanelStyle::None => {}
        PanelStyle::Sharp => {
            surface.set_fill(c.panel_background);
            surface.fill_rect(x, y, w, h);
            surface.set_stroke(c.panel_border, 1.0);
            surface.stroke_rect(x, y, w, h);
        }
        PanelStyle::Rounded => {
            let r = (h.min(w) * 0.25).min(8.0);
            let outline = rounded_rect(x, y, w, h, r);
            surface.set_fill(c.panel_background);
            surface.fill_polygon(&outline);
            surface.set_stroke(c.panel_border, 1.5);
            surface.stroke_polygon(&outline);
        }
        PanelStyle::Bracket => {
            surface.set_fill(c.panel_background);
            surface.fill_rect(x, y, w, h);
            let arm = (w.min(h) * 0.3).min(12.0);
            surface.set_stroke(c.panel_border, 2.0);
            for (cx, cy, dx, dy) in [
                (x, y, 1.0, 1.0),
                (x + w, y, -1.0, 1.0),
                (x, y + h, 1.0, -1.0),
                (x + w, y + h, -1.0, -1.0),
            ] {
                surface.line(cx, cy, cx + arm * dx, cy);
                surface.line(cx, cy, cx, cy + arm * dy);
            }
        }
    }
}

/// Octagon approximating a rounded rectangle.
fn rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(f32, f32)> {
    vec![
        (x + r, y),
        (x + w - r, y),
        (x + w, y + r),
        (x + w, y + h - r),
        (x + w - r, y + h),
        (x + r, y + h),
        (x, y + h - r),
        (x, y + r),
    ]
}

/// Horizontal gauge filled left to right.
#[allow(clippy::too_many_arguments)]
pub fn draw_bar(
    surface: &mut dyn Surface,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    fraction: f32,
    fill: Color,
    background: Color,
) {
    surface.set_fill(background);
    surface.fill_rect(x, y, w, h);
    let filled = w * fraction.clamp(0.0, 1.0);
    if filled > 0.0 {
        surface.set_fill(fill);
        surface.fill_rect(x, y, filled, h);
    }
}

/// Arrow-shaped player ship centered on (cx, cy), nose up.
pub fn ship_points(cx: f32, cy: f32, size: f32) -> [(f32, f32); 4] {
    let half = size / 2.0;
    [
        (cx, cy - half),
        (cx + half, cy + half),
        (cx, cy + half * 0.4),
        (cx - half, cy + half),
    ]
}

/// Heart made of two lobes and a point.
pub fn fill_heart(surface: &mut dyn Surface, cx: f32, cy: f32, size: f32) {
    let lobe = size * 0.27;
    surface.fill_circle(cx - lobe, cy - lobe * 0.5, lobe);
    surface.fill_circle(cx + lobe, cy - lobe * 0.5, lobe);
    surface.fill_polygon(&[
        (cx - lobe * 2.0, cy - lobe * 0.3),
        (cx + lobe * 2.0, cy - lobe * 0.3),
        (cx, cy + size * 0.5),
    ]);
}

/// Round bomb with a short fuse.
pub fn fill_bomb(surface: &mut dyn Surface, cx: f32, cy: f32, size: f32) {
    let r = size * 0.4;
    surface.fill_circle(cx, cy + size * 0.05, r);
    surface.line(cx + r * 0.6, cy - r * 0.6, cx + r, cy - r * 1.2);
}

/// Text gauge such as `[#####-----]`.
pub fn ascii_gauge(fraction: f32, cells: usize) -> String {
    let cells = cells.max(1);
    let filled = ((fraction.clamp(0.0, 1.0) * cells as f32).round() as usize).min(cells);
    let mut gauge = String::with_capacity(cells + 2);
    gauge.push('[');
    gauge.extend(std::iter::repeat_n('#', filled));
    gauge.extend(std::iter::repeat_n('-', cells - filled));
    gauge.push(']');
    gauge
}

/// Groups digits by thousands: 1234567 -> "1,234,567".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_gauge() {
        assert_eq!(ascii_gauge(0.5, 10), "[#####-----]");
        assert_eq!(ascii_gauge(1.5, 4), "[####]");
        assert_eq!(ascii_gauge(0.0, 0), "[-]");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
