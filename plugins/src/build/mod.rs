mod npm;

pub use npm::NpmBuilder;
