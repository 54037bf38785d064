//! Canonical variable registry and display configuration.
//!
//! A canonical variable is a normalized display name plus the rules needed
//! to resolve it from heterogeneous grid sources: source-name aliases, an
//! optional required flow-type, a unit-conversion tag, and the flags that
//! select the resolution policy (accumulation differencing, cloud layer
//! combination, vector composition).
//!
//! Conversion logic is a closed tag set rather than callables so that task
//! payloads stay fully serializable across the worker process boundary.

use serde::{Deserialize, Serialize};

/// Source attribute distinguishing instantaneous values from running
/// cumulative totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    Instant,
    Accum,
}

impl FlowType {
    /// Attribute value this flow-type must match exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowType::Instant => "instant",
            FlowType::Accum => "accum",
        }
    }
}

/// Unit-conversion rule, dispatched by a single pure function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversionRule {
    /// No transformation
    #[default]
    None,
    /// Subtract 273.15 when the field mean exceeds 200 (absolute
    /// temperature scale sniffing)
    KelvinIfOver200,
    /// Divide by 100 when the field mean exceeds 80000 (raw pascal
    /// scale sniffing)
    PascalIfOver80000,
}

/// Identifier for a fixed color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScaleId {
    Temperature,
    Pressure,
    Humidity,
    Precipitation,
    Wind,
    Cloud,
}

/// Fixed display configuration for one variable.
///
/// `vmin`/`vmax` are deliberately not autoscaled so that color meaning is
/// stable across the whole frame sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub scale: ColorScaleId,
    pub vmin: f32,
    pub vmax: f32,
    pub unit: String,
}

/// A named u/v component pair for vector composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentPair {
    pub u: String,
    pub v: String,
}

impl ComponentPair {
    pub fn new(u: &str, v: &str) -> Self {
        Self {
            u: u.to_string(),
            v: v.to_string(),
        }
    }
}

/// Vector composition rule: component pairings tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorComposition {
    /// Pairings in preference order (preferred first, then fallback)
    pub pairs: Vec<ComponentPair>,
}

/// A canonical variable definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalVariable {
    /// Display name, independent of any source naming convention
    pub name: String,
    /// Acceptable source names, in priority order
    pub aliases: Vec<String>,
    /// When set, a source variable is only accepted if its `step_type`
    /// attribute matches exactly
    pub required_flow_type: Option<FlowType>,
    /// Unit-normalization rule
    pub conversion: ConversionRule,
    /// Cumulative total requiring step-to-step differencing
    pub is_accumulation: bool,
    /// Combine cloud layers by elementwise maximum when no pre-combined
    /// source is available
    pub is_cloud: bool,
    /// Compose from u/v components instead of alias lookup
    pub vector: Option<VectorComposition>,
    /// Fixed rendering configuration
    pub display: DisplayConfig,
}

impl CanonicalVariable {
    fn scalar(name: &str, aliases: &[&str], display: DisplayConfig) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
            required_flow_type: None,
            conversion: ConversionRule::None,
            is_accumulation: false,
            is_cloud: false,
            vector: None,
            display,
        }
    }
}

/// Cloud layer source names combined by elementwise maximum.
pub const CLOUD_LAYERS: [&str; 3] = ["lcc", "mcc", "hcc"];

/// The built-in canonical variable registry.
///
/// Order is significant: it fixes panel order in rendered frames.
pub fn builtin_variables() -> Vec<CanonicalVariable> {
    vec![
        CanonicalVariable {
            conversion: ConversionRule::KelvinIfOver200,
            ..CanonicalVariable::scalar(
                "Temperature",
                &["t", "2t", "t2m"],
                DisplayConfig {
                    scale: ColorScaleId::Temperature,
                    vmin: -10.0,
                    vmax: 35.0,
                    unit: "degC".to_string(),
                },
            )
        },
        CanonicalVariable {
            conversion: ConversionRule::PascalIfOver80000,
            ..CanonicalVariable::scalar(
                "Pressure",
                &["prmsl", "msl", "sp"],
                DisplayConfig {
                    scale: ColorScaleId::Pressure,
                    vmin: 990.0,
                    vmax: 1025.0,
                    unit: "hPa".to_string(),
                },
            )
        },
        CanonicalVariable::scalar(
            "Humidity",
            &["r", "2r", "r2"],
            DisplayConfig {
                scale: ColorScaleId::Humidity,
                vmin: 40.0,
                vmax: 100.0,
                unit: "%".to_string(),
            },
        ),
        CanonicalVariable {
            required_flow_type: Some(FlowType::Accum),
            is_accumulation: true,
            ..CanonicalVariable::scalar(
                "Precipitation",
                &["precipitation", "tp", "apcp", "unknown"],
                DisplayConfig {
                    scale: ColorScaleId::Precipitation,
                    vmin: 0.0,
                    vmax: 50.0,
                    unit: "mm/h".to_string(),
                },
            )
        },
        CanonicalVariable {
            vector: Some(VectorComposition {
                pairs: vec![
                    ComponentPair::new("u10", "v10"),
                    ComponentPair::new("u", "v"),
                ],
            }),
            ..CanonicalVariable::scalar(
                "Wind Speed",
                &[],
                DisplayConfig {
                    scale: ColorScaleId::Wind,
                    vmin: 0.0,
                    vmax: 25.0,
                    unit: "m/s".to_string(),
                },
            )
        },
        CanonicalVariable {
            is_cloud: true,
            ..CanonicalVariable::scalar(
                "Cloud Cover",
                &["tcc"],
                DisplayConfig {
                    scale: ColorScaleId::Cloud,
                    vmin: 0.0,
                    vmax: 100.0,
                    unit: "%".to_string(),
                },
            )
        },
    ]
}
