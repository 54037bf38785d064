//! Multi-panel frame composition.

use frames_common::FieldBundle;

use crate::canvas::Canvas;
use crate::panel::{render_panel, BACKGROUND, PANEL_HEIGHT, PANEL_WIDTH, TEXT_COLOR};
use crate::text::{draw_text, text_width};

/// Header band above the panel grid, carrying the valid-time title.
const HEADER_HEIGHT: usize = 40;
const MAX_COLUMNS: usize = 2;

/// Panel grid shape for a bundle of `n` fields.
pub fn layout(n: usize) -> (usize, usize) {
    let cols = n.min(MAX_COLUMNS).max(1);
    let rows = n.div_ceil(cols).max(1);
    (cols, rows)
}

/// Compose every field of a bundle into one frame canvas.
///
/// Panels fill the grid row-major in bundle order, which is canonical
/// registry order, so a variable always appears in the same position in
/// every frame where it resolved.
pub fn compose_frame(bundle: &FieldBundle, valid_time: &str) -> Canvas {
    let (cols, rows) = layout(bundle.len());
    let width = cols * PANEL_WIDTH;
    let height = HEADER_HEIGHT + rows * PANEL_HEIGHT;
    let mut canvas = Canvas::new(width, height, BACKGROUND);

    let title_scale = 3;
    let tw = text_width(valid_time, title_scale);
    let tx = width.saturating_sub(tw) / 2;
    draw_text(&mut canvas, tx, 8, valid_time, TEXT_COLOR, title_scale);

    for (i, field) in bundle.fields.iter().enumerate() {
        let panel = render_panel(field);
        let col = i % cols;
        let row = i / cols;
        canvas.blit(
            &panel,
            col * PANEL_WIDTH,
            HEADER_HEIGHT + row * PANEL_HEIGHT,
        );
    }
    canvas
}
