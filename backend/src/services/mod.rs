pub mod editor;
pub mod preview;
pub mod templates;
pub mod workflow;
