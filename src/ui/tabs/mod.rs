pub mod calendar;
pub mod dashboard;
pub mod editor;
pub mod public;
