//! Features the translation session is built from
//!
//! - `translator`: remote endpoint client
//! - `keyboard`: Mansi character picker
//! - `clipboard`: copy-with-confirmation

pub mod translator;
pub mod keyboard;
pub mod clipboard;
