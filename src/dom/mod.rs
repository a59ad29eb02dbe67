pub mod document;
pub mod events;
pub mod parse;
pub mod serialize;
