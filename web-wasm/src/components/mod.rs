pub mod camera_registry;
pub mod dashboard;
pub mod header;
pub mod live_preview;
pub mod login_page;
pub mod progress_bar;
pub mod results_view;
pub mod search_panel;
pub mod target_list;
pub mod upload_area;
