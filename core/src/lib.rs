#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate log;

pub mod canvas;
pub mod chain;
pub mod color;
pub mod config;
pub mod segment;
pub mod vector;
