//! Appearance settings and the daily focus goal

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Contrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccentColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
}

impl AccentColor {
    /// Hue (degrees) used for the primary and accent colors
    pub fn hue(self) -> u16 {
        match self {
            AccentColor::Blue => 231,
            AccentColor::Purple => 262,
            AccentColor::Green => 145,
            AccentColor::Orange => 35,
            AccentColor::Pink => 330,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub accent: AccentColor,
    #[serde(default = "default_daily_goal")]
    pub daily_goal_minutes: u32,
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_GOAL_MINUTES
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            accent: AccentColor::default(),
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
        }
    }
}

/// Partial update; absent fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub accent: Option<AccentColor>,
    pub daily_goal_minutes: Option<u32>,
}

impl Settings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(accent) = update.accent {
            self.accent = accent;
        }
        if let Some(goal) = update.daily_goal_minutes {
            self.daily_goal_minutes = goal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"accent":"pink"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.accent.hue(), 330);
        assert_eq!(settings.daily_goal_minutes, DEFAULT_DAILY_GOAL_MINUTES);
    }

    #[test]
    fn test_apply_update() {
        let mut settings = Settings::default();
        settings.apply(SettingsUpdate {
            theme: Some(Theme::Contrast),
            accent: None,
            daily_goal_minutes: Some(90),
        });
        assert_eq!(settings.theme, Theme::Contrast);
        assert_eq!(settings.accent, AccentColor::Blue);
        assert_eq!(settings.daily_goal_minutes, 90);
    }
}
