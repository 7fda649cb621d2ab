pub mod config;
pub mod help_popup;
pub mod i18n;
pub mod keybinds;
pub mod logging;
pub mod paths;
pub mod ui;
pub mod which_key;
