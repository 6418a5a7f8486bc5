//! Day/night theme handling. A theme only decides which of two colours plays
//! the light surface and which plays the dark content; everything else in the
//! UI derives from that pair.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable many terminals export as `"<fg>;<bg>"` colour indices.
pub const HOST_COLOR_VAR: &str = "COLORFGBG";

const WHITE: Rgb = Rgb(255, 255, 255);
const NEAR_BLACK: Rgb = Rgb(10, 10, 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme '{0}', expected 'day' or 'night'")]
    Unknown(String),
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Day, Theme::Night];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Day => "Day",
            Theme::Night => "Night",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Day => Palette {
                light: WHITE,
                dark: NEAR_BLACK,
            },
            Theme::Night => Palette {
                light: NEAR_BLACK,
                dark: WHITE,
            },
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour mapping applied to the whole surface. `light` fills backgrounds,
/// `dark` draws text and borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub light: Rgb,
    pub dark: Rgb,
}

/// Read the terminal's dark-mode hint from a `COLORFGBG` style value.
/// Returns `None` when the value is missing or unparseable.
pub fn host_prefers_dark(colorfgbg: Option<&str>) -> Option<bool> {
    let background = colorfgbg?.rsplit(';').next()?.trim();
    let index: u8 = background.parse().ok()?;
    Some(matches!(index, 0..=6 | 8))
}

/// Pick the startup theme. A valid persisted value wins; otherwise the host
/// hint decides, defaulting to day.
pub fn resolve_initial_theme(persisted: Option<&str>, host_dark: Option<bool>) -> Theme {
    if let Some(theme) = persisted.and_then(|raw| raw.parse().ok()) {
        return theme;
    }
    match host_dark {
        Some(true) => Theme::Night,
        _ => Theme::Day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!("day".parse::<Theme>(), Ok(Theme::Day));
        assert_eq!("night".parse::<Theme>(), Ok(Theme::Night));
        assert_eq!(
            "Night".parse::<Theme>(),
            Err(ThemeError::Unknown("Night".to_string()))
        );
        assert!("dusk".parse::<Theme>().is_err());
    }

    #[test]
    fn night_swaps_day_colours() {
        let day = Theme::Day.palette();
        let night = Theme::Night.palette();
        assert_eq!(day.light, Rgb(255, 255, 255));
        assert_eq!(day.dark, Rgb(10, 10, 20));
        assert_eq!(night.light, day.dark);
        assert_eq!(night.dark, day.light);
    }

    #[test]
    fn host_signal_reads_background_index() {
        assert_eq!(host_prefers_dark(Some("15;0")), Some(true));
        assert_eq!(host_prefers_dark(Some("0;15")), Some(false));
        assert_eq!(host_prefers_dark(Some("12;default;8")), Some(true));
        assert_eq!(host_prefers_dark(Some("garbage")), None);
        assert_eq!(host_prefers_dark(None), None);
    }

    #[test]
    fn persisted_preference_beats_host_signal() {
        assert_eq!(resolve_initial_theme(Some("day"), Some(true)), Theme::Day);
        assert_eq!(resolve_initial_theme(None, Some(true)), Theme::Night);
        assert_eq!(resolve_initial_theme(Some("sepia"), Some(true)), Theme::Night);
        assert_eq!(resolve_initial_theme(None, None), Theme::Day);
    }
}
