//! Text settings for label style classes.

use std::fmt;

/// Font style of a text class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Italic => write!(f, "italic"),
        }
    }
}

/// Font size and style shared by every label of one class.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_size: f32,
    font_style: FontStyle,
}

impl TextDefinition {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns a copy with the given font style (builder style).
    pub fn with_font_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = font_style;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    /// Renders the definition as CSS declarations. Normal style is implied.
    pub fn to_css(&self) -> String {
        match self.font_style {
            FontStyle::Normal => format!("font-size: {}px;", self.font_size),
            FontStyle::Italic => format!(
                "font-style: {}; font-size: {}px;",
                self.font_style, self.font_size
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_definition_css() {
        let plain = TextDefinition::new(24.0);
        assert_eq!(plain.to_css(), "font-size: 24px;");

        let italic = TextDefinition::new(12.0).with_font_style(FontStyle::Italic);
        assert_eq!(italic.font_style(), FontStyle::Italic);
        assert_eq!(italic.to_css(), "font-style: italic; font-size: 12px;");
    }
}
