pub mod ascii_utils;
pub mod builder;
pub mod cell;
pub mod direction;
pub mod error;
pub mod grid;
pub mod map;
pub mod progress;
pub mod route_finder;
pub mod source;
pub mod symbols;
