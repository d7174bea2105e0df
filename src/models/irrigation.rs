use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IrrigationMethod {
    Drip,
    Sprinkler,
    Flood,
    Subsurface,
    CenterPivot,
    MicroSprinkler,
}

impl IrrigationMethod {
    /// Methods in comparison order. Ties in the irrigation comparison go to
    /// the earlier entry.
    pub fn all() -> &'static [IrrigationMethod] {
        &[
            IrrigationMethod::Drip,
            IrrigationMethod::Sprinkler,
            IrrigationMethod::Flood,
            IrrigationMethod::Subsurface,
            IrrigationMethod::CenterPivot,
            IrrigationMethod::MicroSprinkler,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Drip => "Drip",
            IrrigationMethod::Sprinkler => "Sprinkler",
            IrrigationMethod::Flood => "Flood",
            IrrigationMethod::Subsurface => "Subsurface",
            IrrigationMethod::CenterPivot => "Center Pivot",
            IrrigationMethod::MicroSprinkler => "Micro-sprinkler",
        }
    }

    /// French label shown on advisory forms.
    pub fn local_name(&self) -> &'static str {
        match self {
            IrrigationMethod::Drip => "Goutte à goutte",
            IrrigationMethod::Sprinkler => "Aspersion",
            IrrigationMethod::Flood => "Inondation",
            IrrigationMethod::Subsurface => "Irrigation souterraine",
            IrrigationMethod::CenterPivot => "Pivot central",
            IrrigationMethod::MicroSprinkler => "Micro-aspersion",
        }
    }

    /// Share of applied water that reaches the crop.
    pub fn efficiency_factor(&self) -> f64 {
        match self {
            IrrigationMethod::Drip => 0.95,
            IrrigationMethod::Sprinkler => 0.80,
            IrrigationMethod::Flood => 0.65,
            IrrigationMethod::Subsurface => 0.90,
            IrrigationMethod::CenterPivot => 0.85,
            IrrigationMethod::MicroSprinkler => 0.88,
        }
    }

    /// Multiplier applied by the yield estimator.
    pub fn yield_multiplier(&self) -> f64 {
        match self {
            IrrigationMethod::Drip => 1.1,
            IrrigationMethod::Sprinkler => 1.0,
            IrrigationMethod::Flood => 0.9,
            _ => 1.0,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drip" | "goutte à goutte" | "goutte a goutte" => Some(IrrigationMethod::Drip),
            "sprinkler" | "aspersion" => Some(IrrigationMethod::Sprinkler),
            "flood" | "inondation" => Some(IrrigationMethod::Flood),
            "subsurface" | "irrigation souterraine" => Some(IrrigationMethod::Subsurface),
            "centerpivot" | "center pivot" | "center-pivot" | "pivot central" => {
                Some(IrrigationMethod::CenterPivot)
            }
            "microsprinkler" | "micro-sprinkler" | "micro sprinkler" | "micro-aspersion" => {
                Some(IrrigationMethod::MicroSprinkler)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drip_is_most_efficient_and_flood_least() {
        let max = IrrigationMethod::all()
            .iter()
            .max_by(|a, b| a.efficiency_factor().total_cmp(&b.efficiency_factor()))
            .unwrap();
        let min = IrrigationMethod::all()
            .iter()
            .min_by(|a, b| a.efficiency_factor().total_cmp(&b.efficiency_factor()))
            .unwrap();
        assert_eq!(*max, IrrigationMethod::Drip);
        assert_eq!(*min, IrrigationMethod::Flood);
    }

    #[test]
    fn irrigation_method_from_str() {
        assert_eq!(IrrigationMethod::from_str("drip"), Some(IrrigationMethod::Drip));
        assert_eq!(
            IrrigationMethod::from_str("Center Pivot"),
            Some(IrrigationMethod::CenterPivot)
        );
        assert_eq!(
            IrrigationMethod::from_str("Aspersion"),
            Some(IrrigationMethod::Sprinkler)
        );
        assert_eq!(IrrigationMethod::from_str("bucket"), None);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for method in IrrigationMethod::all() {
            assert_eq!(IrrigationMethod::from_str(method.as_str()), Some(*method));
            assert_eq!(IrrigationMethod::from_str(method.local_name()), Some(*method));
        }
    }

    #[test]
    fn only_three_methods_change_yield() {
        assert_eq!(IrrigationMethod::Drip.yield_multiplier(), 1.1);
        assert_eq!(IrrigationMethod::Flood.yield_multiplier(), 0.9);
        assert_eq!(IrrigationMethod::Subsurface.yield_multiplier(), 1.0);
    }
}
