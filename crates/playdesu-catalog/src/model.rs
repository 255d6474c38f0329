//! Game record data model

use serde::{Deserialize, Serialize};

/// A single game record as published by the store catalog.
///
/// Field values are carried verbatim from the wire; nothing is normalized
/// or transformed at parse time. The `game_system` tag stays a free-form
/// string here and is only interpreted at launch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique identifier within a catalog snapshot
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub display_name: String,

    /// Accent color as a `#RRGGBB` hex string
    pub color: String,

    /// Long description
    pub description: String,

    /// Backdrop image URL
    pub backdrop: String,

    /// Poster image URL
    pub poster: String,

    /// ROM file URL
    pub file: String,

    /// Studio / developer name
    pub studio: String,

    /// Target game system tag (NES, SNES, SEGA, GBA, PSX)
    pub game_system: String,

    /// Release year
    pub release_year: String,

    /// Genre
    pub genre: String,

    /// Price in store units
    pub price: i64,

    /// Download counter
    pub downloads: i64,

    /// Rating
    pub rating: i64,

    /// ROM size in megabytes
    pub size: i64,

    /// Ordered screenshot URLs
    pub screenshots: Vec<String>,
}

impl Game {
    /// Parse the accent color into an RGB triple.
    ///
    /// Malformed values fall back to a neutral gray instead of failing the
    /// whole record.
    pub fn accent_color(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color).unwrap_or((0xA1, 0xA3, 0xA2))
    }

    /// One-line metadata summary shown under the title.
    pub fn meta_line(&self) -> String {
        format!(
            "{} • {} • {} • {}",
            self.genre, self.studio, self.game_system, self.release_year
        )
    }
}

/// Parse a `#RRGGBB` hex color string.
fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> Game {
        Game {
            id: "g1".to_string(),
            display_name: "Test Game".to_string(),
            color: "#1C1B1F".to_string(),
            description: "A test game".to_string(),
            backdrop: "http://x/backdrop.png".to_string(),
            poster: "http://x/poster.png".to_string(),
            file: "http://x/g1.nes".to_string(),
            studio: "Test Studio".to_string(),
            game_system: "NES".to_string(),
            release_year: "1990".to_string(),
            genre: "Platformer".to_string(),
            price: 0,
            downloads: 42,
            rating: 5,
            size: 1,
            screenshots: vec!["http://x/s1.png".to_string()],
        }
    }

    #[test]
    fn test_accent_color_parses_hex() {
        let game = sample_game();
        assert_eq!(game.accent_color(), (0x1C, 0x1B, 0x1F));
    }

    #[test]
    fn test_accent_color_falls_back_on_garbage() {
        let mut game = sample_game();
        game.color = "not-a-color".to_string();
        assert_eq!(game.accent_color(), (0xA1, 0xA3, 0xA2));

        game.color = "#12345".to_string();
        assert_eq!(game.accent_color(), (0xA1, 0xA3, 0xA2));
    }

    #[test]
    fn test_meta_line() {
        let game = sample_game();
        assert_eq!(game.meta_line(), "Platformer • Test Studio • NES • 1990");
    }
}
