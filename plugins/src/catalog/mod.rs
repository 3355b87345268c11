mod dir;

pub use dir::DirCatalog;
