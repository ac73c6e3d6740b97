pub mod app;
pub mod edit_view;
pub mod table;
