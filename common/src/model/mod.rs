pub mod columns;
pub mod document;
pub mod preview;
pub mod summary;
pub mod template;
pub mod term;
pub mod workflow;
