pub mod article_view;
pub mod main_window;
pub mod panel_form;
pub mod toggle_button;
