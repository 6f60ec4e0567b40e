pub mod cancel;
pub mod logs;
