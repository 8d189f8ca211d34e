//! Input discovery for the render command

pub mod scanner;

pub use scanner::InputScanner;
