//! Textual rendering of the graph as prefix expressions.
pub mod prefix;

pub use prefix::{encode, encode_bounded, encode_roots, encode_roots_bounded, render, EncodeError};
