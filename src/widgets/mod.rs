pub mod error_toast;
pub mod event_detail;
pub mod event_list;
pub mod footer;
pub mod help_overlay;
pub mod search_input;
pub mod status_bar;
