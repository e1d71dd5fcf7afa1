pub mod panels;
pub mod plot;
pub mod report_view;
