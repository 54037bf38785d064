//! Unit normalization by magnitude sniffing.
//!
//! Source files rarely agree on units for the same quantity, and attribute
//! metadata is too unreliable to dispatch on. Instead the field mean is
//! sniffed against fixed thresholds: a "temperature" with mean 300 is in
//! kelvin, one with mean 27 is already in celsius. The thresholds and the
//! mean-based decision are load-bearing for output parity and must not be
//! replaced with metadata lookups.

use frames_common::{ConversionRule, Grid};

/// Kelvin-scale threshold: no plausible surface temperature in celsius
/// exceeds this mean.
const KELVIN_THRESHOLD: f32 = 200.0;

/// Raw-pascal threshold: sea-level pressure in hPa stays far below this.
const PASCAL_THRESHOLD: f32 = 80000.0;

/// Apply a conversion rule to a field. Pure and stateless.
pub fn normalize(rule: ConversionRule, grid: Grid) -> Grid {
    match rule {
        ConversionRule::None => grid,
        ConversionRule::KelvinIfOver200 => {
            if grid.mean() > KELVIN_THRESHOLD {
                grid.map(|v| v - 273.15)
            } else {
                grid
            }
        }
        ConversionRule::PascalIfOver80000 => {
            if grid.mean() > PASCAL_THRESHOLD {
                grid.map(|v| v / 100.0)
            } else {
                grid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::constant_grid;

    #[test]
    fn test_kelvin_converted() {
        let out = normalize(ConversionRule::KelvinIfOver200, constant_grid(2, 2, 300.0));
        assert!(out.values.iter().all(|&v| (v - 26.85).abs() < 1e-4));
    }

    #[test]
    fn test_celsius_passes_through() {
        let out = normalize(ConversionRule::KelvinIfOver200, constant_grid(2, 2, 26.85));
        assert!(out.values.iter().all(|&v| (v - 26.85).abs() < 1e-6));
    }

    #[test]
    fn test_pascal_converted() {
        let out = normalize(
            ConversionRule::PascalIfOver80000,
            constant_grid(2, 2, 101325.0),
        );
        assert!(out.values.iter().all(|&v| (v - 1013.25).abs() < 1e-3));
    }

    #[test]
    fn test_hectopascal_passes_through() {
        let out = normalize(
            ConversionRule::PascalIfOver80000,
            constant_grid(2, 2, 1013.25),
        );
        assert!(out.values.iter().all(|&v| (v - 1013.25).abs() < 1e-6));
    }

    #[test]
    fn test_none_rule_is_identity() {
        let out = normalize(ConversionRule::None, constant_grid(2, 2, 123456.0));
        assert!(out.values.iter().all(|&v| v == 123456.0));
    }
}
