//! Instructor-side quiz generator: turns a quiz request into a
//! self-contained student app script plus PDF completion certificates.

pub mod quiz;
