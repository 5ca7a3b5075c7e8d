pub mod clipboard;
pub mod features;
pub mod session;
