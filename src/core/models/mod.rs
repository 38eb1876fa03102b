//! Data models for the course planner

pub mod course;

pub use course::Course;
