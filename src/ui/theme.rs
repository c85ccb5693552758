use ratatui::style::{Color, Modifier, Style};

use crate::calendar::{Category, HabitColor};
use crate::heat_map::Intensity;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub today: Color,
    pub weekday_header: Color,
    pub heat_none: Color,
    pub heat_low: Color,
    pub heat_medium: Color,
    pub heat_high: Color,
    pub neutral: Color,
    pub work: Color,
    pub personal: Color,
    pub health: Color,
    pub social: Color,
    pub learning: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            today: Color::White,
            weekday_header: Color::Yellow,
            heat_none: Color::DarkGray,
            heat_low: Color::Rgb(155, 233, 168),
            heat_medium: Color::Rgb(64, 196, 99),
            heat_high: Color::Rgb(33, 110, 57),
            neutral: Color::Gray,
            work: Color::Blue,
            personal: Color::Magenta,
            health: Color::Green,
            social: Color::Yellow,
            learning: Color::Cyan,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            today: Color::Rgb(235, 219, 178),
            weekday_header: Color::Rgb(254, 128, 25),
            heat_none: Color::Rgb(60, 56, 54),
            heat_low: Color::Rgb(121, 116, 14),
            heat_medium: Color::Rgb(152, 151, 26),
            heat_high: Color::Rgb(184, 187, 38),
            neutral: Color::Rgb(146, 131, 116),
            work: Color::Rgb(131, 165, 152),
            personal: Color::Rgb(211, 134, 155),
            health: Color::Rgb(184, 187, 38),
            social: Color::Rgb(250, 189, 47),
            learning: Color::Rgb(142, 192, 124),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            today: Color::Rgb(236, 239, 244),
            weekday_header: Color::Rgb(235, 203, 139),
            heat_none: Color::Rgb(59, 66, 82),
            heat_low: Color::Rgb(94, 129, 172),
            heat_medium: Color::Rgb(129, 161, 193),
            heat_high: Color::Rgb(136, 192, 208),
            neutral: Color::Rgb(76, 86, 106),
            work: Color::Rgb(129, 161, 193),
            personal: Color::Rgb(180, 142, 173),
            health: Color::Rgb(163, 190, 140),
            social: Color::Rgb(235, 203, 139),
            learning: Color::Rgb(143, 188, 187),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }

    pub fn heat_color(&self, intensity: Intensity) -> Color {
        match intensity {
            Intensity::None => self.heat_none,
            Intensity::Low => self.heat_low,
            Intensity::Medium => self.heat_medium,
            Intensity::High => self.heat_high,
        }
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Work => self.work,
            Category::Personal => self.personal,
            Category::Health => self.health,
            Category::Social => self.social,
            Category::Learning => self.learning,
            Category::Other => self.neutral,
        }
    }

    pub fn category_style(&self, category: Category) -> Style {
        let style = Style::default().fg(self.category_color(category));
        match category {
            Category::Other => style,
            _ => style.add_modifier(Modifier::BOLD),
        }
    }

    pub fn habit_color(&self, color: HabitColor) -> Color {
        match color {
            HabitColor::Blue => Color::Rgb(59, 130, 246),
            HabitColor::Green => Color::Rgb(34, 197, 94),
            HabitColor::Orange => Color::Rgb(249, 115, 22),
            HabitColor::Purple => Color::Rgb(168, 85, 247),
            HabitColor::Rose => Color::Rgb(244, 63, 94),
            HabitColor::Other => self.neutral,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
