pub mod books;
pub mod catalog;
pub mod core;
pub mod covers;
pub mod pages;
pub mod utils;
