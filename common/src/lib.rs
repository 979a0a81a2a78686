pub mod defaults;
pub mod editor;
pub mod jobs;
pub mod migrate;
pub mod model;
pub mod requests;
