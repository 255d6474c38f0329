//! Game system tags and their core/extension tables

/// The five game systems the store publishes.
///
/// Catalog records carry the tag as a free-form string; anything that is
/// not one of these five is unplayable and the launch path refuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSystem {
    Nes,
    Snes,
    Sega,
    Gba,
    Psx,
}

impl GameSystem {
    /// Parse a catalog system tag. Tags are matched exactly as published.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NES" => Some(GameSystem::Nes),
            "SNES" => Some(GameSystem::Snes),
            "SEGA" => Some(GameSystem::Sega),
            "GBA" => Some(GameSystem::Gba),
            "PSX" => Some(GameSystem::Psx),
            _ => None,
        }
    }

    /// The catalog tag for this system
    pub fn tag(&self) -> &'static str {
        match self {
            GameSystem::Nes => "NES",
            GameSystem::Snes => "SNES",
            GameSystem::Sega => "SEGA",
            GameSystem::Gba => "GBA",
            GameSystem::Psx => "PSX",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            GameSystem::Nes => "Nintendo Entertainment System",
            GameSystem::Snes => "Super Nintendo",
            GameSystem::Sega => "Sega Genesis",
            GameSystem::Gba => "Game Boy Advance",
            GameSystem::Psx => "Sony PlayStation",
        }
    }

    /// File extension the store uses for this system's ROMs
    pub fn rom_extension(&self) -> &'static str {
        match self {
            GameSystem::Nes => ".nes",
            GameSystem::Snes => ".snes",
            GameSystem::Sega => ".gen",
            GameSystem::Gba => ".gba",
            GameSystem::Psx => ".bin",
        }
    }

    /// Core library filename for this system.
    ///
    /// Carried verbatim from the store's published table, including its
    /// NES->snes9x and SNES->pcsx_rearmed pairings. Do not reshuffle
    /// without confirming against the deployed core set.
    pub fn core_file_name(&self) -> &'static str {
        match self {
            GameSystem::Nes => "libsnes9x_libretro_android.so",
            GameSystem::Snes => "libpcsx_rearmed_libretro_android.so",
            GameSystem::Sega => "libgenesis_plus_gx_libretro_android.so",
            GameSystem::Gba => "libmgba_libretro_android.so",
            GameSystem::Psx => "libpcsx_rearmed_libretro_android.so",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(GameSystem::from_tag("NES"), Some(GameSystem::Nes));
        assert_eq!(GameSystem::from_tag("SNES"), Some(GameSystem::Snes));
        assert_eq!(GameSystem::from_tag("SEGA"), Some(GameSystem::Sega));
        assert_eq!(GameSystem::from_tag("GBA"), Some(GameSystem::Gba));
        assert_eq!(GameSystem::from_tag("PSX"), Some(GameSystem::Psx));
    }

    #[test]
    fn test_from_tag_rejects_everything_else() {
        assert_eq!(GameSystem::from_tag("N64"), None);
        assert_eq!(GameSystem::from_tag("nes"), None);
        assert_eq!(GameSystem::from_tag(""), None);
        assert_eq!(GameSystem::from_tag("SNES "), None);
    }

    #[test]
    fn test_rom_extensions() {
        assert_eq!(GameSystem::Nes.rom_extension(), ".nes");
        assert_eq!(GameSystem::Snes.rom_extension(), ".snes");
        assert_eq!(GameSystem::Sega.rom_extension(), ".gen");
        assert_eq!(GameSystem::Gba.rom_extension(), ".gba");
        assert_eq!(GameSystem::Psx.rom_extension(), ".bin");
    }

    #[test]
    fn test_core_table_matches_store() {
        assert_eq!(
            GameSystem::Nes.core_file_name(),
            "libsnes9x_libretro_android.so"
        );
        assert_eq!(
            GameSystem::Snes.core_file_name(),
            "libpcsx_rearmed_libretro_android.so"
        );
        assert_eq!(
            GameSystem::Sega.core_file_name(),
            "libgenesis_plus_gx_libretro_android.so"
        );
        assert_eq!(
            GameSystem::Gba.core_file_name(),
            "libmgba_libretro_android.so"
        );
        // PSX and SNES share a core in the published table
        assert_eq!(
            GameSystem::Psx.core_file_name(),
            GameSystem::Snes.core_file_name()
        );
    }
}
