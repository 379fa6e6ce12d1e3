//! Theme catalog.
//!
//! Themes are plain data consumed by frontends; the core never rasterizes
//! them. Colors are `#RRGGBB`/`#RRGGBBAA` hex strings. Only the active
//! theme *id* is persisted (see `storage`), so the catalog itself stays a
//! static table of named constructors.

/// Color slots shared by every surface a frontend draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub toolbar: &'static str,
    pub toolbar_hover: &'static str,
    pub canvas: &'static str,
    pub grid_primary: &'static str,
    pub grid_secondary: &'static str,
    pub object_background: &'static str,
    pub object_border: &'static str,
    pub object_text: &'static str,
    pub connection_line: &'static str,
    pub connection_line_hover: &'static str,
    pub modal_background: &'static str,
}

/// Layout metrics shared by all themes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSpacing {
    pub toolbar_width: f32,
    pub object_padding_x: f32,
    pub object_padding_y: f32,
    pub object_border_radius: f32,
}

const BASE_SPACING: ThemeSpacing = ThemeSpacing {
    toolbar_width: 288.0,
    object_padding_x: 32.0,
    object_padding_y: 24.0,
    object_border_radius: 8.0,
};

/// A complete theme: identity + colors + spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: ThemeColors,
    pub spacing: ThemeSpacing,
}

impl Theme {
    const fn new(id: &'static str, name: &'static str, colors: ThemeColors) -> Self {
        Self {
            id,
            name,
            colors,
            spacing: BASE_SPACING,
        }
    }

    /// The stock theme used when no saved id resolves.
    pub fn default_theme() -> &'static Theme {
        &PREDEFINED[2] // midnight-blue
    }

    /// Resolve a theme id, falling back to the default theme.
    pub fn by_id(id: &str) -> &'static Theme {
        PREDEFINED
            .iter()
            .find(|t| t.id == id)
            .unwrap_or_else(|| Theme::default_theme())
    }
}

/// The stock theme table.
pub static PREDEFINED: &[Theme] = &[
    Theme::new(
        "dark-matrix",
        "Matrix",
        ThemeColors {
            toolbar: "#1a1f1a",
            toolbar_hover: "#2a3f2a",
            canvas: "#0a0f0a",
            grid_primary: "#00FF0012",
            grid_secondary: "#00FF001F",
            object_background: "#1a1f1a",
            object_border: "#00FF004D",
            object_text: "#00ff00",
            connection_line: "#00ff00",
            connection_line_hover: "#00ff00",
            modal_background: "#1a1f1a",
        },
    ),
    Theme::new(
        "cyberpunk",
        "Cyberpunk",
        ThemeColors {
            toolbar: "#180028",
            toolbar_hover: "#2a0f3f",
            canvas: "#10001a",
            grid_primary: "#FF00FF12",
            grid_secondary: "#00FFFF1F",
            object_background: "#180028",
            object_border: "#FF00FF4D",
            object_text: "#ff00ff",
            connection_line: "#00ffff",
            connection_line_hover: "#ff00ff",
            modal_background: "#180028",
        },
    ),
    Theme::new(
        "midnight-blue",
        "Midnight Blue",
        ThemeColors {
            toolbar: "#1a1f35",
            toolbar_hover: "#2a3147",
            canvas: "#141829",
            grid_primary: "#4154FF12",
            grid_secondary: "#4154FF1F",
            object_background: "#1a1f35",
            object_border: "#FFFFFF1A",
            object_text: "#ffffff",
            connection_line: "#4154ff",
            connection_line_hover: "#6478ff",
            modal_background: "#1a1f35",
        },
    ),
    Theme::new(
        "monokai",
        "Monokai",
        ThemeColors {
            toolbar: "#272822",
            toolbar_hover: "#3e3d32",
            canvas: "#1e1f1c",
            grid_primary: "#F9267212",
            grid_secondary: "#F926721F",
            object_background: "#272822",
            object_border: "#F926724D",
            object_text: "#f8f8f2",
            connection_line: "#a6e22e",
            connection_line_hover: "#f92672",
            modal_background: "#272822",
        },
    ),
    Theme::new(
        "nord",
        "Nord",
        ThemeColors {
            toolbar: "#2e3440",
            toolbar_hover: "#3b4252",
            canvas: "#242933",
            grid_primary: "#88C0D012",
            grid_secondary: "#88C0D01F",
            object_background: "#2e3440",
            object_border: "#88C0D04D",
            object_text: "#eceff4",
            connection_line: "#88c0d0",
            connection_line_hover: "#81a1c1",
            modal_background: "#2e3440",
        },
    ),
    Theme::new(
        "synthwave",
        "Synthwave",
        ThemeColors {
            toolbar: "#2b213a",
            toolbar_hover: "#3b2952",
            canvas: "#241b2f",
            grid_primary: "#FF42F412",
            grid_secondary: "#21F8FF1F",
            object_background: "#2b213a",
            object_border: "#FF42F44D",
            object_text: "#ff42f4",
            connection_line: "#21f8ff",
            connection_line_hover: "#ff42f4",
            modal_background: "#2b213a",
        },
    ),
    Theme::new(
        "dracula",
        "Dracula",
        ThemeColors {
            toolbar: "#282a36",
            toolbar_hover: "#44475a",
            canvas: "#21222c",
            grid_primary: "#BD93F912",
            grid_secondary: "#BD93F91F",
            object_background: "#282a36",
            object_border: "#BD93F94D",
            object_text: "#f8f8f2",
            connection_line: "#50fa7b",
            connection_line_hover: "#ff79c6",
            modal_background: "#282a36",
        },
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in PREDEFINED.iter().enumerate() {
            for b in &PREDEFINED[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn by_id_resolves_known_theme() {
        assert_eq!(Theme::by_id("nord").name, "Nord");
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        assert_eq!(Theme::by_id("hotdog-stand").id, Theme::default_theme().id);
    }

    #[test]
    fn default_is_midnight_blue() {
        assert_eq!(Theme::default_theme().id, "midnight-blue");
    }
}
