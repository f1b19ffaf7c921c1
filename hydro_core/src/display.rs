//! Presentation context passed explicitly to whatever renders a report.

use crate::evaluator::Severity;

/// Dark-mode flag and the growing system currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContext {
    pub dark_mode: bool,
    pub system: String,
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self {
            dark_mode: false,
            system: "Main".to_string(),
        }
    }
}

/// Hex colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    text: "#2c3e50",
    muted: "#7f8c8d",
    accent: "#3498db",
};

pub const DARK: Palette = Palette {
    background: "#121212",
    text: "#ffffff",
    muted: "#bdc3c7",
    accent: "#3498db",
};

impl Palette {
    pub fn for_context(ctx: &DisplayContext) -> Self {
        if ctx.dark_mode { DARK } else { LIGHT }
    }

    /// Severity colors are shared by both themes.
    pub const fn severity_color(self, s: Severity) -> &'static str {
        match s {
            Severity::Ok => "#27ae60",
            Severity::Warning => "#f39c12",
            Severity::Critical => "#e74c3c",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_selects_dark_palette() {
        let ctx = DisplayContext {
            dark_mode: true,
            ..DisplayContext::default()
        };
        assert_eq!(Palette::for_context(&ctx).background, "#121212");
        assert_eq!(Palette::for_context(&DisplayContext::default()), LIGHT);
    }

    #[test]
    fn severity_colors() {
        assert_eq!(LIGHT.severity_color(Severity::Ok), "#27ae60");
        assert_eq!(DARK.severity_color(Severity::Critical), "#e74c3c");
    }
}
