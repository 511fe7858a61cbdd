pub mod map;
pub mod overview;
