pub mod classifier;
pub mod course_builder;
pub mod html_parser;
pub mod runner;
pub mod schedule;
pub mod time_slot;
pub mod tree;
pub mod writer;
