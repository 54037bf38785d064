//! Fixed color scales for the canonical variables.
//!
//! Each scale is a list of color stops over the normalized 0..1 range.
//! Values are normalized against the variable's fixed vmin/vmax before
//! lookup; the data range itself is never consulted, so a given color
//! always means the same physical value across the whole frame sequence.

use frames_common::{ColorScaleId, DisplayConfig};

use crate::canvas::Color;

/// A gradient stop at a normalized position.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub pos: f32,
    pub color: Color,
}

const fn stop(pos: f32, color: Color) -> ColorStop {
    ColorStop { pos, color }
}

/// Temperature: blue (cold) through yellow to red (hot).
const TEMPERATURE: [ColorStop; 5] = [
    stop(0.0, Color::rgb(0x31, 0x36, 0x95)),
    stop(0.25, Color::rgb(0x74, 0xad, 0xd1)),
    stop(0.5, Color::rgb(0xff, 0xff, 0xbf)),
    stop(0.75, Color::rgb(0xf4, 0x6d, 0x43)),
    stop(1.0, Color::rgb(0xa5, 0x00, 0x26)),
];

/// Pressure: red (low) through yellow to green (high).
const PRESSURE: [ColorStop; 3] = [
    stop(0.0, Color::rgb(0xa5, 0x00, 0x26)),
    stop(0.5, Color::rgb(0xff, 0xff, 0xbf)),
    stop(1.0, Color::rgb(0x00, 0x68, 0x37)),
];

/// Humidity: yellow (dry) through green to deep blue (wet).
const HUMIDITY: [ColorStop; 3] = [
    stop(0.0, Color::rgb(0xff, 0xff, 0xd9)),
    stop(0.5, Color::rgb(0x41, 0xb6, 0xc4)),
    stop(1.0, Color::rgb(0x08, 0x1d, 0x58)),
];

/// Precipitation: transparent at zero, then blue, green, yellow, orange,
/// red, magenta for the heaviest rates.
const PRECIPITATION: [ColorStop; 8] = [
    stop(0.0, Color::rgba(0xff, 0xff, 0xff, 0)),
    stop(0.02, Color::rgb(0xc0, 0xe0, 0xff)),
    stop(0.1, Color::rgb(0x40, 0x80, 0xff)),
    stop(0.3, Color::rgb(0x40, 0xff, 0x40)),
    stop(0.5, Color::rgb(0xff, 0xff, 0x40)),
    stop(0.7, Color::rgb(0xff, 0x80, 0x40)),
    stop(0.85, Color::rgb(0xff, 0x40, 0x40)),
    stop(1.0, Color::rgb(0xff, 0x40, 0xff)),
];

/// Wind speed: blue (calm) through green and yellow to red (strong).
const WIND: [ColorStop; 5] = [
    stop(0.0, Color::rgb(0x40, 0x40, 0xff)),
    stop(0.3, Color::rgb(0x40, 0xff, 0x40)),
    stop(0.6, Color::rgb(0xff, 0xff, 0x40)),
    stop(0.85, Color::rgb(0xff, 0x80, 0x40)),
    stop(1.0, Color::rgb(0xff, 0x40, 0x40)),
];

/// Cloud cover: black (clear) to white (overcast).
const CLOUD: [ColorStop; 2] = [
    stop(0.0, Color::rgb(0x00, 0x00, 0x00)),
    stop(1.0, Color::rgb(0xff, 0xff, 0xff)),
];

/// Stops for a scale identifier.
pub fn stops(id: ColorScaleId) -> &'static [ColorStop] {
    match id {
        ColorScaleId::Temperature => &TEMPERATURE,
        ColorScaleId::Pressure => &PRESSURE,
        ColorScaleId::Humidity => &HUMIDITY,
        ColorScaleId::Precipitation => &PRECIPITATION,
        ColorScaleId::Wind => &WIND,
        ColorScaleId::Cloud => &CLOUD,
    }
}

/// Sample a scale at a normalized position (clamped to 0..1), linearly
/// interpolating between the surrounding stops, alpha included.
pub fn sample(id: ColorScaleId, t: f32) -> Color {
    let stops = stops(id);
    let t = t.clamp(0.0, 1.0);

    let mut low = stops[0];
    for &s in stops {
        if s.pos <= t {
            low = s;
        } else {
            let span = s.pos - low.pos;
            let frac = if span.abs() < 1e-6 {
                0.0
            } else {
                (t - low.pos) / span
            };
            return lerp(low.color, s.color, frac);
        }
    }
    low.color
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 * (1.0 - t) + y as f32 * t).round() as u8;
    Color::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Map one data value through a variable's fixed display range.
///
/// NaN (outside the data domain) renders fully transparent.
pub fn color_for_value(display: &DisplayConfig, value: f32) -> Color {
    if value.is_nan() {
        return Color::TRANSPARENT;
    }
    let range = display.vmax - display.vmin;
    let t = if range.abs() < 1e-6 {
        0.5
    } else {
        (value - display.vmin) / range
    };
    sample(display.scale, t)
}
