//! Document decoding boundary
//! Turns PDF and Word uploads into plain text for extraction

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
