mod command;

pub use command::CommandProject;
