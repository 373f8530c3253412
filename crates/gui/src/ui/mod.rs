pub mod config_panel;
pub mod status_bar;
