//! Markup scanning primitives shared by the source and HTML report parsers.

mod scope;
mod tokenizer;

pub use scope::{NestingScope, TextCapture};
pub use tokenizer::{Tag, Token, Tokenizer, decode_entities};
