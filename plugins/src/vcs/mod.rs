mod git;

pub use git::GitClient;
