pub mod config;
pub mod format;
pub mod modes;
pub mod session;
pub mod simulate;
