//! One panel: a titled plot of a single resolved field with a colorbar.

use frames_common::ResolvedField;
use rayon::prelude::*;

use crate::canvas::{Canvas, Color};
use crate::colorscale::{color_for_value, sample};
use crate::text::{draw_text, GLYPH_HEIGHT};

pub const PANEL_WIDTH: usize = 640;
pub const PANEL_HEIGHT: usize = 400;

const TITLE_BAND: usize = 28;
const MARGIN: usize = 8;
const COLORBAR_WIDTH: usize = 16;
/// Room for the bar plus its value labels.
const COLORBAR_REGION: usize = 72;

pub const BACKGROUND: Color = Color::rgb(0x1a, 0x1a, 0x1a);
pub const TEXT_COLOR: Color = Color::rgb(0xe0, 0xe0, 0xe0);

/// Render one field into a fixed-size panel.
///
/// The grid is sampled nearest-neighbor into the plot area, so panels for
/// grids of different resolutions still line up in the composed frame.
pub fn render_panel(field: &ResolvedField) -> Canvas {
    let mut canvas = Canvas::new(PANEL_WIDTH, PANEL_HEIGHT, BACKGROUND);

    let title = if field.display.unit.is_empty() {
        field.name.clone()
    } else {
        format!("{} ({})", field.name, field.display.unit)
    };
    draw_text(&mut canvas, MARGIN, MARGIN, &title, TEXT_COLOR, 2);

    let plot_x = MARGIN;
    let plot_y = TITLE_BAND;
    let plot_w = PANEL_WIDTH - COLORBAR_REGION - MARGIN;
    let plot_h = PANEL_HEIGHT - TITLE_BAND - MARGIN;

    let grid = &field.grid;
    let display = &field.display;

    let rows: Vec<Vec<Color>> = (0..plot_h)
        .into_par_iter()
        .map(|py| {
            let gy = py * grid.height / plot_h;
            (0..plot_w)
                .map(|px| {
                    let gx = px * grid.width / plot_w;
                    let value = grid.values[gy * grid.width + gx];
                    color_for_value(display, value)
                })
                .collect()
        })
        .collect();

    for (py, row) in rows.iter().enumerate() {
        for (px, &color) in row.iter().enumerate() {
            canvas.blend_pixel(plot_x + px, plot_y + py, color);
        }
    }

    draw_colorbar(&mut canvas, field, plot_y, plot_h);
    canvas
}

/// Vertical colorbar on the right edge, vmax at the top.
fn draw_colorbar(canvas: &mut Canvas, field: &ResolvedField, bar_y: usize, bar_h: usize) {
    let bar_x = PANEL_WIDTH - COLORBAR_REGION;
    let display = &field.display;

    for py in 0..bar_h {
        let t = 1.0 - py as f32 / (bar_h - 1).max(1) as f32;
        let color = sample(display.scale, t);
        for px in 0..COLORBAR_WIDTH {
            canvas.blend_pixel(bar_x + px, bar_y + py, color);
        }
    }

    let label_x = bar_x + COLORBAR_WIDTH + 4;
    draw_text(canvas, label_x, bar_y, &format_value(display.vmax), TEXT_COLOR, 1);
    draw_text(
        canvas,
        label_x,
        bar_y + bar_h - GLYPH_HEIGHT,
        &format_value(display.vmin),
        TEXT_COLOR,
        1,
    );
}

fn format_value(v: f32) -> String {
    if (v - v.round()).abs() < 1e-3 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frames_common::{builtin_variables, Grid};

    fn field(values: Vec<f32>, w: usize, h: usize) -> ResolvedField {
        let vars = builtin_variables();
        let temp = &vars[0];
        ResolvedField {
            name: temp.name.clone(),
            grid: Grid::new(
                w,
                h,
                values,
                (0..h * w).map(|i| 40.0 - (i / w) as f32).collect(),
                (0..h * w).map(|i| 130.0 + (i % w) as f32).collect(),
            )
            .unwrap(),
            display: temp.display.clone(),
        }
    }

    #[test]
    fn test_panel_dimensions() {
        let f = field(vec![20.0; 16], 4, 4);
        let p = render_panel(&f);
        assert_eq!(p.width, PANEL_WIDTH);
        assert_eq!(p.height, PANEL_HEIGHT);
    }

    #[test]
    fn test_plot_area_is_colored() {
        // A hot uniform field paints the plot area away from the background.
        let f = field(vec![35.0; 16], 4, 4);
        let p = render_panel(&f);
        let x = MARGIN + 10;
        let y = TITLE_BAND + 10;
        let idx = (y * PANEL_WIDTH + x) * 4;
        let px = &p.pixels[idx..idx + 4];
        assert_ne!(px, &[BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(25.0), "25");
        assert_eq!(format_value(-10.0), "-10");
        assert_eq!(format_value(1013.2), "1013.2");
    }
}
