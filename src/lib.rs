pub mod config;
pub mod display;
pub mod error;
pub mod scan;
pub mod slideshow;
pub mod tasks {
    pub mod controller;
    pub mod input;
    pub mod presenter;
    pub mod ticker;
}
