pub mod input;
pub mod steps;
pub mod timeline;
