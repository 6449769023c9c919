//! Color themes for the showcase. Ember is the default warm palette;
//! the others are dark variants cycled with `t`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Ember,
    TokyoNightStorm,
    Dracula,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 3] = [
        ThemeVariant::Ember,
        ThemeVariant::TokyoNightStorm,
        ThemeVariant::Dracula,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeVariant::Ember => "Ember",
            ThemeVariant::TokyoNightStorm => "Tokyo Night Storm",
            ThemeVariant::Dracula => "Dracula",
        }
    }

    /// Key used in config.toml
    pub fn config_key(&self) -> &'static str {
        match self {
            ThemeVariant::Ember => "ember",
            ThemeVariant::TokyoNightStorm => "tokyonight-storm",
            ThemeVariant::Dracula => "dracula",
        }
    }

    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.config_key() == key)
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct ColorPalette {
    // Backgrounds
    pub bg: Color,
    pub bg_dark: Color,
    pub bg_highlight: Color,

    // Foregrounds
    pub fg: Color,
    pub comment: Color,

    // Primary colors
    pub blue: Color,
    pub green: Color,
    pub teal: Color,
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,

    // UI elements
    pub border: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Convert to ratatui::Color
    pub fn to_ratatui(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }
}

impl ColorPalette {
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Ember => Self::ember(),
            ThemeVariant::TokyoNightStorm => Self::tokyonight_storm(),
            ThemeVariant::Dracula => Self::dracula(),
        }
    }

    /// Orange-on-cream
    fn ember() -> Self {
        Self {
            bg: Color::hex(0xfff7ed),
            bg_dark: Color::hex(0xffedd5),
            bg_highlight: Color::hex(0xfed7aa),

            fg: Color::hex(0x431407),
            comment: Color::hex(0x78716c),

            blue: Color::hex(0x3b82f6),
            green: Color::hex(0x22c55e),
            teal: Color::hex(0x9a3412),
            red: Color::hex(0xef4444),
            orange: Color::hex(0xea580c),
            yellow: Color::hex(0xeab308),

            border: Color::hex(0xfdba74),
        }
    }

    fn tokyonight_storm() -> Self {
        Self {
            bg: Color::hex(0x24283b),
            bg_dark: Color::hex(0x1f2335),
            bg_highlight: Color::hex(0x292e42),

            fg: Color::hex(0xc0caf5),
            comment: Color::hex(0x565f89),

            blue: Color::hex(0x7aa2f7),
            green: Color::hex(0x9ece6a),
            teal: Color::hex(0x1abc9c),
            red: Color::hex(0xf7768e),
            orange: Color::hex(0xff9e64),
            yellow: Color::hex(0xe0af68),

            border: Color::hex(0x3b4261),
        }
    }

    fn dracula() -> Self {
        Self {
            bg: Color::hex(0x282a36),
            bg_dark: Color::hex(0x21222c),
            bg_highlight: Color::hex(0x44475a),

            fg: Color::hex(0xf8f8f2),
            comment: Color::hex(0x6272a4),

            blue: Color::hex(0x8be9fd),
            green: Color::hex(0x50fa7b),
            teal: Color::hex(0xbd93f9),
            red: Color::hex(0xff5555),
            orange: Color::hex(0xffb86c),
            yellow: Color::hex(0xf1fa8c),

            border: Color::hex(0x44475a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Color::hex(0x9a3412);
        assert_eq!((c.r, c.g, c.b), (0x9a, 0x34, 0x12));
        assert_eq!(c.to_ratatui(), ratatui::style::Color::Rgb(0x9a, 0x34, 0x12));
    }

    #[test]
    fn test_config_keys_round_trip() {
        for variant in ThemeVariant::ALL {
            assert_eq!(ThemeVariant::from_config_key(variant.config_key()), Some(variant));
        }
        assert_eq!(ThemeVariant::from_config_key("solarized"), None);
    }

    #[test]
    fn test_cycle_visits_every_theme() {
        let mut v = ThemeVariant::Ember;
        for _ in 0..ThemeVariant::ALL.len() {
            v = v.next();
        }
        assert_eq!(v, ThemeVariant::Ember);
    }
}
