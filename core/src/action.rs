//! The closed set of deployment actions the proxy knows how to route.
//!
//! Each variant carries both its wire name and its failure text, so the
//! dispatch table and the error table can never disagree about a key.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NpmBuild,
    CatalogTo,
    CatalogBack,
    ProjectStart,
    ProjectRestart,
    ProjectReplaceVersion,
    GitPush,
    GitPull,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::NpmBuild,
        Action::CatalogTo,
        Action::CatalogBack,
        Action::ProjectStart,
        Action::ProjectRestart,
        Action::ProjectReplaceVersion,
        Action::GitPush,
        Action::GitPull,
    ];

    /// Exact-match lookup; no trimming or case folding.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::NpmBuild => "npm.build",
            Action::CatalogTo => "catalog.to",
            Action::CatalogBack => "catalog.back",
            Action::ProjectStart => "project.start",
            Action::ProjectRestart => "project.restart",
            Action::ProjectReplaceVersion => "project.replaceVersion",
            Action::GitPush => "git.push",
            Action::GitPull => "git.pull",
        }
    }

    /// Human-readable text reported when this action's handler fails.
    pub fn error_message(self) -> &'static str {
        match self {
            Action::NpmBuild => "project build failed",
            Action::CatalogTo => "failed to move build output into project directory",
            Action::CatalogBack => "failed to restore previous deployment",
            Action::ProjectStart => "failed to start project",
            Action::ProjectRestart => "failed to restart project",
            Action::ProjectReplaceVersion => "failed to replace project version",
            Action::GitPush => "git push failed",
            Action::GitPull => "git pull failed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
