//! Synthetic grid generators for predictable, verifiable test data.

use frames_common::Grid;

fn coords(width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let mut lats = Vec::with_capacity(width * height);
    let mut lons = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            // Japan-ish domain, north to south
            lats.push(46.0 - row as f32 * (16.0 / height.max(1) as f32));
            lons.push(128.0 + col as f32 * (20.0 / width.max(1) as f32));
        }
    }
    (lats, lons)
}

/// A grid where every point holds the same value.
pub fn constant_grid(width: usize, height: usize, value: f32) -> Grid {
    let (lats, lons) = coords(width, height);
    Grid::new(width, height, vec![value; width * height], lats, lons).unwrap()
}

/// A grid with a diagonal gradient between `min` and `max`.
pub fn gradient_grid(width: usize, height: usize, min: f32, max: f32) -> Grid {
    let mut values = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x = col as f32 / width.max(1) as f32;
            let y = row as f32 / height.max(1) as f32;
            values.push(min + (max - min) * (x + y) / 2.0);
        }
    }
    let (lats, lons) = coords(width, height);
    Grid::new(width, height, values, lats, lons).unwrap()
}

/// A temperature-like grid in Kelvin (~270K to ~300K gradient).
pub fn temperature_grid(width: usize, height: usize) -> Grid {
    gradient_grid(width, height, 270.0, 300.0)
}

/// A surface-pressure-like grid in raw pascals (~99000 to ~102500).
pub fn pressure_grid(width: usize, height: usize) -> Grid {
    gradient_grid(width, height, 99000.0, 102500.0)
}
