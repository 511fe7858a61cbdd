pub mod map_canvas;
pub mod panels;
pub mod popup;
pub mod tables;
