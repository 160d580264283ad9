//! Report artifact output

pub mod writer;

pub use writer::OutlineWriter;
