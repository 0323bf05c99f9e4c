//! CLI Commands

pub mod records;
pub mod report;
pub mod run;
pub mod scaffold;
