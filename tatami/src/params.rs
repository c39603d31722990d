/// Lower bound for the share of the output width given to the main area.
pub const MIN_RATIO: f64 = 0.1;
/// Upper bound for the share of the output width given to the main area.
pub const MAX_RATIO: f64 = 0.9;

pub fn clamp_ratio(ratio: f64) -> f64 {
    ratio.clamp(MIN_RATIO, MAX_RATIO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    MainCount,
    MainRatio,
    ViewPadding,
    OuterPadding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Uint,
    Fixed,
}

impl ParamKey {
    pub const ALL: [ParamKey; 4] = [
        ParamKey::MainCount,
        ParamKey::MainRatio,
        ParamKey::ViewPadding,
        ParamKey::OuterPadding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::MainCount => "main_count",
            ParamKey::MainRatio => "main_ratio",
            ParamKey::ViewPadding => "view_padding",
            ParamKey::OuterPadding => "outer_padding",
        }
    }

    /// Name used when the value lives in a river-options option.
    pub fn option_name(self) -> &'static str {
        match self {
            ParamKey::MainRatio => "main_factor",
            other => other.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "main_count" => Some(ParamKey::MainCount),
            "main_ratio" | "main_factor" => Some(ParamKey::MainRatio),
            "view_padding" => Some(ParamKey::ViewPadding),
            "outer_padding" => Some(ParamKey::OuterPadding),
            _ => None,
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ParamKey::MainRatio => ValueKind::Fixed,
            _ => ValueKind::Uint,
        }
    }
}

/// A parameter value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Uint(u32),
    Fixed(f64),
}

/// A value pushed by the compositor into an option handle.
///
/// Options are shared between clients, so the wire kind may not match the
/// kind this layout declared.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Int(i32),
    Uint(u32),
    Fixed(f64),
    String(Option<String>),
}

/// Absolute value or signed delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Set(Magnitude),
    Delta(Magnitude),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    Integer(i64),
    Real(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub main_count: u32,
    pub main_ratio: f64,
    pub view_padding: u32,
    pub outer_padding: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            main_count: 1,
            main_ratio: 0.6,
            view_padding: 5,
            outer_padding: 5,
        }
    }
}

impl Parameters {
    pub fn get(&self, key: ParamKey) -> Value {
        match key {
            ParamKey::MainCount => Value::Uint(self.main_count),
            ParamKey::MainRatio => Value::Fixed(self.main_ratio),
            ParamKey::ViewPadding => Value::Uint(self.view_padding),
            ParamKey::OuterPadding => Value::Uint(self.outer_padding),
        }
    }

    pub fn default_value(key: ParamKey) -> Value {
        Parameters::default().get(key)
    }

    pub fn reset(&mut self) {
        *self = Parameters::default();
    }

    fn uint_mut(&mut self, key: ParamKey) -> Option<&mut u32> {
        match key {
            ParamKey::MainCount => Some(&mut self.main_count),
            ParamKey::ViewPadding => Some(&mut self.view_padding),
            ParamKey::OuterPadding => Some(&mut self.outer_padding),
            ParamKey::MainRatio => None,
        }
    }

    fn set_ratio(&mut self, ratio: f64) -> bool {
        if !ratio.is_finite() {
            return false;
        }
        self.main_ratio = clamp_ratio(ratio);
        true
    }

    /// Applies a value pushed into the option handle for `key`.
    ///
    /// Returns `false`, leaving the store untouched, when the wire kind does
    /// not match the kind declared for `key`.
    pub fn accept_option(&mut self, key: ParamKey, value: &WireValue) -> bool {
        match (key.kind(), value) {
            (ValueKind::Uint, WireValue::Uint(v)) => match self.uint_mut(key) {
                Some(slot) => {
                    *slot = *v;
                    true
                }
                None => false,
            },
            (ValueKind::Fixed, WireValue::Fixed(v)) => self.set_ratio(*v),
            _ => false,
        }
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> bool {
        let Some(slot) = ParamKey::from_name(name).and_then(|key| self.uint_mut(key)) else {
            return false;
        };
        match u32::try_from(value) {
            Ok(v) => {
                *slot = v;
                true
            }
            Err(_) => false,
        }
    }

    pub fn mod_int(&mut self, name: &str, delta: i32) -> bool {
        let Some(slot) = ParamKey::from_name(name).and_then(|key| self.uint_mut(key)) else {
            return false;
        };
        match u32::try_from(i64::from(*slot) + i64::from(delta)) {
            Ok(v) => {
                *slot = v;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_fixed(&mut self, name: &str, value: f64) -> bool {
        match ParamKey::from_name(name) {
            Some(ParamKey::MainRatio) => self.set_ratio(value),
            _ => false,
        }
    }

    pub fn mod_fixed(&mut self, name: &str, delta: f64) -> bool {
        match ParamKey::from_name(name) {
            Some(ParamKey::MainRatio) => self.set_ratio(self.main_ratio + delta),
            _ => false,
        }
    }

    /// Applies a user adjustment. Integer deltas saturate at zero, ratios
    /// are clamped. A magnitude of the wrong kind is ignored.
    pub fn adjust(&mut self, key: ParamKey, adjustment: Adjustment) -> bool {
        if key == ParamKey::MainRatio {
            return match adjustment {
                Adjustment::Set(Magnitude::Real(v)) => self.set_ratio(v),
                Adjustment::Delta(Magnitude::Real(d)) => self.set_ratio(self.main_ratio + d),
                _ => false,
            };
        }

        let Some(slot) = self.uint_mut(key) else {
            return false;
        };
        let next = match adjustment {
            Adjustment::Set(Magnitude::Integer(v)) => v,
            Adjustment::Delta(Magnitude::Integer(d)) => i64::from(*slot).saturating_add(d),
            _ => return false,
        };
        *slot = next.clamp(0, i64::from(u32::MAX)) as u32;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = Parameters::default();
        assert_eq!(params.main_count, 1);
        assert_eq!(params.main_ratio, 0.6);
        assert_eq!(params.view_padding, 5);
        assert_eq!(params.outer_padding, 5);
        assert_eq!(Parameters::default_value(ParamKey::MainRatio), Value::Fixed(0.6));
    }

    #[test]
    fn test_names() {
        for key in ParamKey::ALL {
            assert_eq!(ParamKey::from_name(key.name()), Some(key));
            assert_eq!(ParamKey::from_name(key.option_name()), Some(key));
        }
        assert_eq!(ParamKey::MainRatio.option_name(), "main_factor");
        assert_eq!(ParamKey::from_name("bogus"), None);
    }

    #[test]
    fn test_accept_option_matching_kind() {
        let mut params = Parameters::default();
        assert!(params.accept_option(ParamKey::MainCount, &WireValue::Uint(3)));
        assert_eq!(params.main_count, 3);
        assert!(params.accept_option(ParamKey::MainRatio, &WireValue::Fixed(0.75)));
        assert_eq!(params.main_ratio, 0.75);
    }

    #[test]
    fn test_accept_option_mismatched_kind() {
        let mut params = Parameters::default();
        assert!(!params.accept_option(ParamKey::MainCount, &WireValue::Int(3)));
        assert!(!params.accept_option(ParamKey::MainCount, &WireValue::Fixed(3.0)));
        assert!(!params.accept_option(ParamKey::MainRatio, &WireValue::Uint(1)));
        assert!(!params.accept_option(
            ParamKey::ViewPadding,
            &WireValue::String(Some("10".to_string()))
        ));
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn test_accept_option_clamps_ratio() {
        let mut params = Parameters::default();
        assert!(params.accept_option(ParamKey::MainRatio, &WireValue::Fixed(2.0)));
        assert_eq!(params.main_ratio, MAX_RATIO);
    }

    #[test]
    fn test_set_and_mod_int() {
        let mut params = Parameters::default();
        assert!(params.set_int("view_padding", 10));
        assert_eq!(params.view_padding, 10);
        assert!(params.mod_int("main_count", 2));
        assert_eq!(params.main_count, 3);

        assert!(!params.set_int("outer_padding", -1));
        assert_eq!(params.outer_padding, 5);
        assert!(!params.mod_int("main_count", -4));
        assert_eq!(params.main_count, 3);
    }

    #[test]
    fn test_int_events_ignore_unknown_and_mistyped_names() {
        let mut params = Parameters::default();
        assert!(!params.set_int("bogus", 3));
        assert!(!params.set_int("main_ratio", 1));
        assert!(!params.set_fixed("main_count", 0.5));
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn test_fixed_values_stay_clamped() {
        let mut params = Parameters::default();
        assert!(params.set_fixed("main_factor", 0.05));
        assert_eq!(params.main_ratio, MIN_RATIO);
        assert!(params.mod_fixed("main_ratio", 100.0));
        assert_eq!(params.main_ratio, MAX_RATIO);
        assert!(params.mod_fixed("main_ratio", -0.1));
        assert!((params.main_ratio - 0.8).abs() < 1e-9);
        assert!(!params.set_fixed("main_ratio", f64::NAN));
        assert!((params.main_ratio - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for ratio in [-3.0, 0.0, 0.1, 0.42, 0.9, 1.0, 17.5] {
            let once = clamp_ratio(ratio);
            assert_eq!(clamp_ratio(once), once);
            assert!((MIN_RATIO..=MAX_RATIO).contains(&once));
        }
    }

    #[test]
    fn test_adjust_saturates_at_zero() {
        let mut params = Parameters::default();
        params.adjust(ParamKey::MainCount, Adjustment::Delta(Magnitude::Integer(2)));
        assert_eq!(params.main_count, 3);

        let mut params = Parameters::default();
        params.adjust(ParamKey::MainCount, Adjustment::Delta(Magnitude::Integer(-5)));
        assert_eq!(params.main_count, 0);
    }

    #[test]
    fn test_adjust_rejects_wrong_magnitude_kind() {
        let mut params = Parameters::default();
        assert!(!params.adjust(ParamKey::ViewPadding, Adjustment::Set(Magnitude::Real(1.5))));
        assert!(!params.adjust(ParamKey::MainRatio, Adjustment::Set(Magnitude::Integer(1))));
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn test_reset() {
        let mut params = Parameters {
            main_count: 7,
            main_ratio: 0.2,
            view_padding: 0,
            outer_padding: 40,
        };
        params.reset();
        assert_eq!(params, Parameters::default());
    }
}
