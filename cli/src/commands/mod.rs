pub mod actions;
pub mod call;
pub mod cli;
pub mod pipeline;
