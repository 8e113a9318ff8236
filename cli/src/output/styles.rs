//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Info messages (cyan)
    pub info: Style,
    /// Success messages (green)
    pub success: Style,
    /// Warning messages (yellow)
    pub warning: Style,
    /// Error messages (red)
    pub error: Style,
    /// Debug messages (blue)
    pub debug: Style,
    /// Section headers (bold magenta)
    pub header: Style,
    /// Bold text
    pub bold: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.info = Style::new().bright_cyan();
        self.success = Style::new().bright_green();
        self.warning = Style::new().bright_yellow();
        self.error = Style::new().bright_red();
        self.debug = Style::new().bright_blue();
        self.header = Style::new().bold().bright_magenta();
        self.bold = Style::new().bold();
    }
}
