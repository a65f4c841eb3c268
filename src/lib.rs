//! **mazecarver** generates perfect mazes (spanning trees over a rectangular grid) with
//! the Hunt-and-Kill algorithm and derives the wall and corner layout a renderer needs
//! to build them.

pub mod builder;
pub mod cells;
pub mod corners;
pub mod generators;
pub mod grid;
pub mod layout;
pub mod units;
pub mod utils;
