/// Terminal utilities for responsive display
pub struct Terminal;

impl Terminal {
    /// Get terminal width, with fallback to 80 columns
    pub fn width() -> u16 {
        terminal_size::terminal_size()
            .map(|(width, _)| width.0)
            .unwrap_or(80)
    }

    /// Create a separator line that fits the terminal width
    pub fn separator(char: char) -> String {
        char.to_string().repeat(Self::width().min(100) as usize)
    }
}

/// Display mode based on terminal width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    Compact, // < 100 columns
    Normal,  // >= 100 columns
}

impl DisplayMode {
    pub fn detect(force_compact: bool) -> Self {
        Self::for_width(Terminal::width(), force_compact)
    }

    pub fn for_width(width: u16, force_compact: bool) -> Self {
        if force_compact || width < 100 {
            DisplayMode::Compact
        } else {
            DisplayMode::Normal
        }
    }

    /// The joined license string is the widest column; drop it when narrow
    pub fn should_show_licenses(&self) -> bool {
        matches!(self, DisplayMode::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_width() {
        assert_eq!(DisplayMode::for_width(80, false), DisplayMode::Compact);
        assert_eq!(DisplayMode::for_width(140, false), DisplayMode::Normal);
        assert_eq!(DisplayMode::for_width(140, true), DisplayMode::Compact);
        assert!(!DisplayMode::Compact.should_show_licenses());
    }
}
