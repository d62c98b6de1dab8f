//! BTLx document parsing.

mod btlx;
mod elements;

pub use btlx::{parse_btlx_bytes, parse_btlx_file, parse_btlx_str};
