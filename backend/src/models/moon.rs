use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight named lunar phases, each covering an eighth of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarPhase {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl LunarPhase {
    /// All phases in cycle order, starting at new moon.
    pub const ALL: [LunarPhase; 8] = [
        LunarPhase::NewMoon,
        LunarPhase::WaxingCrescent,
        LunarPhase::FirstQuarter,
        LunarPhase::WaxingGibbous,
        LunarPhase::FullMoon,
        LunarPhase::WaningGibbous,
        LunarPhase::LastQuarter,
        LunarPhase::WaningCrescent,
    ];

    /// Display name, e.g. `"Waxing Gibbous"`.
    pub fn name(&self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "New Moon",
            LunarPhase::WaxingCrescent => "Waxing Crescent",
            LunarPhase::FirstQuarter => "First Quarter",
            LunarPhase::WaxingGibbous => "Waxing Gibbous",
            LunarPhase::FullMoon => "Full Moon",
            LunarPhase::WaningGibbous => "Waning Gibbous",
            LunarPhase::LastQuarter => "Last Quarter",
            LunarPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Phase for a bin index in `0..8`; larger indices saturate to the last phase.
    pub fn from_bin(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn is_waxing(&self) -> bool {
        matches!(
            self,
            LunarPhase::WaxingCrescent | LunarPhase::FirstQuarter | LunarPhase::WaxingGibbous
        )
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Moon state at an instant.
///
/// Derived purely from a timestamp; recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub phase: LunarPhase,
    /// Lit fraction of the visible disk, rounded, in [0, 100].
    pub illumination_percent: u8,
    /// Days since the last new moon, in [0, synodic period).
    pub age_days: f64,
}

impl MoonPhase {
    /// Age rounded to the nearest whole day.
    pub fn display_age(&self) -> u32 {
        self.age_days.round() as u32
    }

    /// Moonlight is faint enough that the whole night is usable.
    pub fn is_dark(&self) -> bool {
        self.illumination_percent < 30
    }
}
