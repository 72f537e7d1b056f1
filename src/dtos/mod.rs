pub mod actiondtos;
pub mod relaydtos;
