pub mod app;
pub mod board;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod intro_overlay;
pub mod match_view;
pub mod time_display;
