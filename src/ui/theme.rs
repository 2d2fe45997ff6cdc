use crossterm::style::{Color, ContentStyle};

pub struct Theme;

impl Theme {
    fn fg(color: Color) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(color),
            ..ContentStyle::default()
        }
    }

    pub fn nick() -> ContentStyle {
        Self::fg(Color::Green)
    }

    pub fn info_message() -> ContentStyle {
        Self::fg(Color::Blue)
    }

    pub fn error_message() -> ContentStyle {
        Self::fg(Color::Red)
    }
}
