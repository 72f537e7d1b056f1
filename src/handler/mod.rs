pub mod actions;
pub mod relay;
