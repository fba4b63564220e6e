//! Professions and the player's per-profession settings.
//!
//! Professions are not hardcoded: any name works. The only name the crate
//! knows about is `Merchant`, and only as the default for
//! [`MerchantPricing`](crate::pricing::MerchantPricing).

use crate::interned::interned_name;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

interned_name! {
    /// Interned profession identifier (e.g. "Smithing", "Mining", "Merchant").
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::Profession;
    ///
    /// let smithing = Profession::from_str("Smithing");
    /// assert_eq!(smithing.as_str(), "Smithing");
    /// assert_eq!(Profession::merchant().as_str(), "Merchant");
    /// ```
    pub struct Profession;
}

impl Profession {
    /// Name of the merchant profession.
    pub const MERCHANT: &'static str = "Merchant";

    /// The merchant profession.
    pub fn merchant() -> Self {
        Self::from_str(Self::MERCHANT)
    }
}

/// The player's standing in one profession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfessionSetting {
    /// Whether the player produces this profession's materials themselves.
    pub enabled: bool,
    /// Level attained by the player.
    pub level: u32,
}

impl ProfessionSetting {
    /// An enabled profession at the given level.
    pub fn enabled(level: u32) -> Self {
        Self {
            enabled: true,
            level,
        }
    }

    /// A disabled profession at the given level.
    pub fn disabled(level: u32) -> Self {
        Self {
            enabled: false,
            level,
        }
    }
}

/// Settings for every profession the player has configured.
///
/// A profession with no entry behaves as disabled at level 0.
///
/// # Examples
///
/// ```rust
/// use craftcalc::{Profession, ProfessionSetting, ProfessionSettings};
///
/// let mut settings = ProfessionSettings::new();
/// settings.set(Profession::from_str("Mining"), ProfessionSetting::enabled(10));
///
/// assert!(settings.can_produce(&Profession::from_str("Mining"), Some(5)));
/// assert!(!settings.can_produce(&Profession::from_str("Mining"), Some(20)));
/// assert!(!settings.can_produce(&Profession::from_str("Fishing"), None));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfessionSettings {
    settings: HashMap<Profession, ProfessionSetting>,
}

impl ProfessionSettings {
    /// Create an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the setting for a profession.
    pub fn set(&mut self, profession: Profession, setting: ProfessionSetting) {
        self.settings.insert(profession, setting);
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, profession: impl Into<Profession>, setting: ProfessionSetting) -> Self {
        self.set(profession.into(), setting);
        self
    }

    /// Look up the setting for a profession.
    pub fn get(&self, profession: &Profession) -> Option<&ProfessionSetting> {
        self.settings.get(profession)
    }

    /// Attained level in a profession, 0 when unset.
    pub fn level(&self, profession: &Profession) -> u32 {
        self.get(profession).map_or(0, |s| s.level)
    }

    /// Whether the player may produce something of `profession` requiring
    /// `level_requirement`.
    ///
    /// True only when a setting exists, is enabled, and the attained level
    /// meets the requirement.
    pub fn can_produce(&self, profession: &Profession, level_requirement: Option<u32>) -> bool {
        match self.get(profession) {
            Some(setting) if setting.enabled => {
                level_requirement.map_or(true, |required| required <= setting.level)
            }
            _ => false,
        }
    }
}

impl FromIterator<(Profession, ProfessionSetting)> for ProfessionSettings {
    fn from_iter<I: IntoIterator<Item = (Profession, ProfessionSetting)>>(iter: I) -> Self {
        Self {
            settings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_is_disabled_level_zero() {
        let settings = ProfessionSettings::new();
        let mining = Profession::from_str("Mining");
        assert!(settings.get(&mining).is_none());
        assert_eq!(settings.level(&mining), 0);
        assert!(!settings.can_produce(&mining, None));
    }

    #[test]
    fn test_disabled_setting_cannot_produce() {
        let settings =
            ProfessionSettings::new().with("Mining", ProfessionSetting::disabled(50));
        assert!(!settings.can_produce(&Profession::from_str("Mining"), Some(1)));
    }

    #[test]
    fn test_level_gate() {
        let settings = ProfessionSettings::new().with("Smithing", ProfessionSetting::enabled(10));
        let smithing = Profession::from_str("Smithing");
        assert!(settings.can_produce(&smithing, Some(10)));
        assert!(!settings.can_produce(&smithing, Some(11)));
        assert!(settings.can_produce(&smithing, None));
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{"Mining": {"enabled": true, "level": 12}}"#;
        let settings: ProfessionSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.level(&Profession::from_str("Mining")), 12);
    }
}
