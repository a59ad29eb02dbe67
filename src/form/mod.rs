pub mod controls;
pub mod detector;
pub mod extractor;
pub mod field_model;
pub mod footer;
pub mod injector;
pub mod layout;
pub mod snapshot;
