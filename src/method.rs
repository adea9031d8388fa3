// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calculation conventions.
//!
//! Each [`Method`] fixes the Sun's depression angle for Fajr and a rule for
//! Maghrib and Isha.  A rule is either a depression angle or a number of
//! minutes after the preceding event (sunset for Maghrib, Maghrib for Isha);
//! [`TwilightRule`] makes the two mutually exclusive.
//!
//! | Method | Fajr | Maghrib | Isha |
//! |--------|------|---------|------|
//! | Jafari | 16° | 4° | 14° |
//! | Karachi | 18° | sunset | 18° |
//! | ISNA | 15° | sunset | 15° |
//! | MWL | 18° | sunset | 17° |
//! | Makkah | 18.5° | sunset | 90 min |
//! | Egypt | 19.5° | sunset | 17.5° |
//! | Tehran | 17.7° | 4.5° | 14° |
//! | Custom | 18° | sunset | 17° |

use crate::error::Error;
use qtty::Degrees;
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calculation method identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    /// Ithna Ashari (Jafari).
    Jafari,
    /// University of Islamic Sciences, Karachi.
    Karachi,
    /// Islamic Society of North America.
    #[strum(serialize = "ISNA")]
    Isna,
    /// Muslim World League.
    #[strum(serialize = "MWL")]
    Mwl,
    /// Umm al-Qura University, Makkah.
    Makkah,
    /// Egyptian General Authority of Survey.
    Egypt,
    /// User-defined parameters, see [`MethodTable::set_custom`].
    Custom,
    /// Institute of Geophysics, University of Tehran.
    Tehran,
}

impl Method {
    /// Position of this method in the table (the classic numeric id).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Jafari => "Ithna Ashari",
            Self::Karachi => "University of Islamic Sciences, Karachi",
            Self::Isna => "Islamic Society of North America (ISNA)",
            Self::Mwl => "Muslim World League (MWL)",
            Self::Makkah => "Umm al-Qura, Makkah",
            Self::Egypt => "Egyptian General Authority of Survey",
            Self::Custom => "Custom Setting",
            Self::Tehran => "Institute of Geophysics, University of Tehran",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jafari" => Ok(Self::Jafari),
            "karachi" => Ok(Self::Karachi),
            "isna" => Ok(Self::Isna),
            "mwl" => Ok(Self::Mwl),
            "makkah" | "umm al-qura" | "ummalqura" => Ok(Self::Makkah),
            "egypt" => Ok(Self::Egypt),
            "custom" => Ok(Self::Custom),
            "tehran" => Ok(Self::Tehran),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Which variant of [`TwilightRule`] is in force.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Angle,
    Minutes,
}

/// Maghrib or Isha rule: a depression angle or a fixed delay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TwilightRule {
    /// Sun this far below the horizon.
    Angle(Degrees),
    /// This many minutes after the preceding event.
    Minutes(f64),
}

impl TwilightRule {
    /// Build a rule from its kind and raw value (degrees or minutes).
    pub fn new(kind: RuleKind, value: f64) -> Self {
        match kind {
            RuleKind::Angle => Self::Angle(Degrees::new(value)),
            RuleKind::Minutes => Self::Minutes(value),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Angle(_) => RuleKind::Angle,
            Self::Minutes(_) => RuleKind::Minutes,
        }
    }

    /// Raw value, degrees or minutes depending on the kind.
    pub fn value(&self) -> f64 {
        match self {
            Self::Angle(a) => a.value(),
            Self::Minutes(m) => *m,
        }
    }

    /// The angle, if this is an angle rule.
    pub fn angle(&self) -> Option<Degrees> {
        match self {
            Self::Angle(a) => Some(*a),
            Self::Minutes(_) => None,
        }
    }
}

/// Parameters of one calculation convention.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MethodParameters {
    pub fajr_angle: Degrees,
    pub maghrib: TwilightRule,
    pub isha: TwilightRule,
}

impl MethodParameters {
    const fn angles(fajr: f64, maghrib: f64, isha: f64) -> Self {
        Self {
            fajr_angle: Degrees::new(fajr),
            maghrib: TwilightRule::Angle(Degrees::new(maghrib)),
            isha: TwilightRule::Angle(Degrees::new(isha)),
        }
    }

    const fn at_sunset(fajr: f64, isha: TwilightRule) -> Self {
        Self {
            fajr_angle: Degrees::new(fajr),
            maghrib: TwilightRule::Minutes(0.0),
            isha,
        }
    }

    /// Built-in parameters for `method`.
    pub const fn builtin(method: Method) -> Self {
        match method {
            Method::Jafari => Self::angles(16.0, 4.0, 14.0),
            Method::Karachi => Self::at_sunset(18.0, TwilightRule::Angle(Degrees::new(18.0))),
            Method::Isna => Self::at_sunset(15.0, TwilightRule::Angle(Degrees::new(15.0))),
            Method::Mwl => Self::at_sunset(18.0, TwilightRule::Angle(Degrees::new(17.0))),
            Method::Makkah => Self::at_sunset(18.5, TwilightRule::Minutes(90.0)),
            Method::Egypt => Self::at_sunset(19.5, TwilightRule::Angle(Degrees::new(17.5))),
            Method::Custom => Self::at_sunset(18.0, TwilightRule::Angle(Degrees::new(17.0))),
            Method::Tehran => Self::angles(17.7, 4.5, 14.0),
        }
    }
}

/// Partial override for the custom method.
///
/// `None` slots inherit from whichever method is active when the override is
/// applied, so setting only `fajr_angle` keeps everything else unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CustomParams {
    pub fajr_angle: Option<f64>,
    pub maghrib_kind: Option<RuleKind>,
    pub maghrib_value: Option<f64>,
    pub isha_kind: Option<RuleKind>,
    pub isha_value: Option<f64>,
}

impl CustomParams {
    pub fn with_fajr_angle(mut self, degrees: f64) -> Self {
        self.fajr_angle = Some(degrees);
        self
    }

    pub fn with_maghrib(mut self, rule: TwilightRule) -> Self {
        self.maghrib_kind = Some(rule.kind());
        self.maghrib_value = Some(rule.value());
        self
    }

    pub fn with_isha(mut self, rule: TwilightRule) -> Self {
        self.isha_kind = Some(rule.kind());
        self.isha_value = Some(rule.value());
        self
    }

    /// Fill the unset slots from `base`.
    pub fn merge_onto(&self, base: &MethodParameters) -> MethodParameters {
        let merge_rule = |kind: Option<RuleKind>, value: Option<f64>, rule: TwilightRule| {
            TwilightRule::new(kind.unwrap_or(rule.kind()), value.unwrap_or(rule.value()))
        };
        MethodParameters {
            fajr_angle: self
                .fajr_angle
                .map_or(base.fajr_angle, Degrees::new),
            maghrib: merge_rule(self.maghrib_kind, self.maghrib_value, base.maghrib),
            isha: merge_rule(self.isha_kind, self.isha_value, base.isha),
        }
    }
}

/// Per-engine copy of the method parameters.
///
/// Only the [`Method::Custom`] slot ever changes; each engine owns its own
/// table, so customising one never affects another.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodTable {
    entries: [MethodParameters; 8],
}

impl Default for MethodTable {
    fn default() -> Self {
        use strum::IntoEnumIterator;
        let mut entries = [MethodParameters::builtin(Method::Custom); 8];
        for method in Method::iter() {
            entries[method.index()] = MethodParameters::builtin(method);
        }
        Self { entries }
    }
}

impl MethodTable {
    #[inline]
    pub fn get(&self, method: Method) -> &MethodParameters {
        &self.entries[method.index()]
    }

    /// Overwrite the custom slot, inheriting unset values from `active`.
    ///
    /// Returns [`Method::Custom`], the method that should become active.
    pub fn set_custom(&mut self, active: Method, params: CustomParams) -> Method {
        let merged = params.merge_onto(self.get(active));
        self.entries[Method::Custom.index()] = merged;
        Method::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_table_matches_classic_ids() {
        let ids: Vec<usize> = Method::iter().map(Method::index).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(Method::Tehran.index(), 7);
        assert_eq!(Method::Custom.index(), 6);
    }

    #[test]
    fn builtin_parameters() {
        let table = MethodTable::default();
        let karachi = table.get(Method::Karachi);
        assert_eq!(karachi.fajr_angle, Degrees::new(18.0));
        assert_eq!(karachi.maghrib, TwilightRule::Minutes(0.0));
        assert_eq!(karachi.isha, TwilightRule::Angle(Degrees::new(18.0)));

        let makkah = table.get(Method::Makkah);
        assert_eq!(makkah.isha, TwilightRule::Minutes(90.0));

        let tehran = table.get(Method::Tehran);
        assert_eq!(tehran.maghrib.angle(), Some(Degrees::new(4.5)));
    }

    #[test]
    fn partial_custom_inherits_active_method() {
        let mut table = MethodTable::default();
        let active = table.set_custom(Method::Egypt, CustomParams::default().with_fajr_angle(20.0));
        assert_eq!(active, Method::Custom);

        let custom = table.get(Method::Custom);
        let egypt = table.get(Method::Egypt);
        assert_eq!(custom.fajr_angle, Degrees::new(20.0));
        assert_eq!(custom.maghrib, egypt.maghrib);
        assert_eq!(custom.isha, egypt.isha);
    }

    #[test]
    fn custom_value_keeps_inherited_kind() {
        let mut table = MethodTable::default();
        let params = CustomParams {
            isha_value: Some(120.0),
            ..Default::default()
        };
        table.set_custom(Method::Makkah, params);
        assert_eq!(table.get(Method::Custom).isha, TwilightRule::Minutes(120.0));
    }

    #[test]
    fn custom_rule_switches_kind() {
        let mut table = MethodTable::default();
        let params = CustomParams::default().with_isha(TwilightRule::Minutes(75.0));
        table.set_custom(Method::Mwl, params);
        let custom = table.get(Method::Custom);
        assert_eq!(custom.isha.kind(), RuleKind::Minutes);
        assert_eq!(custom.isha.angle(), None);
    }

    #[test]
    fn customising_does_not_touch_builtins() {
        let mut table = MethodTable::default();
        table.set_custom(Method::Mwl, CustomParams::default().with_fajr_angle(12.0));
        assert_eq!(*table.get(Method::Mwl), MethodParameters::builtin(Method::Mwl));
        assert_eq!(MethodTable::default().get(Method::Custom).fajr_angle, Degrees::new(18.0));
    }

    #[test]
    fn method_names_roundtrip() {
        for method in Method::iter() {
            let parsed: Method = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert_eq!("umm al-qura".parse::<Method>().unwrap(), Method::Makkah);
        assert!(matches!("hanbali".parse::<Method>(), Err(Error::UnknownMethod(_))));
    }
}
