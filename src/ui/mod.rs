pub mod agenda_view;
pub mod ansi;
pub mod heat_map_view;
pub mod theme;
