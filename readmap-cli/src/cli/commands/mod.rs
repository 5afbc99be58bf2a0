pub mod count;
pub mod index;
pub mod map;
pub mod tool;
