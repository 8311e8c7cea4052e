pub mod draw_snake;
pub mod follow_pointer;
