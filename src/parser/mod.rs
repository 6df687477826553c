//! Parser for mustache templates

pub mod ast;
mod builder;
mod grammar;
pub mod lexer;
pub mod walk;

pub use ast::*;
pub use builder::{parse, MAX_SECTION_DEPTH};
pub use walk::{walk, walk_mut, WalkControl};
