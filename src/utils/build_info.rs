//! Build stamp embedded by `build.rs`.

use std::fmt;

/// Package version of this binary.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

macro_rules! build_env {
    ($name:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStamp {
    pub version: &'static str,
    pub commit: &'static str,
    /// `clean`, `dirty` or `unknown` when built outside a git checkout.
    pub worktree: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const STAMP: BuildStamp = BuildStamp {
    version: CLI_VERSION,
    commit: build_env!("TRIPLYTICS_BUILD_HASH"),
    worktree: build_env!("TRIPLYTICS_BUILD_STATUS"),
    built_at: build_env!("TRIPLYTICS_BUILD_TIMESTAMP"),
    target: build_env!("TRIPLYTICS_BUILD_TARGET"),
    profile: build_env!("TRIPLYTICS_BUILD_PROFILE"),
    rustc: build_env!("TRIPLYTICS_BUILD_RUSTC"),
};

pub fn current() -> BuildStamp {
    STAMP
}

impl BuildStamp {
    pub fn is_dirty(&self) -> bool {
        self.worktree == "dirty"
    }
}

impl fmt::Display for BuildStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "triplytics {} ({}", self.version, self.commit)?;
        if self.is_dirty() {
            write!(f, ", modified")?;
        }
        writeln!(f, ")")?;
        writeln!(f, "built {} for {} [{}]", self.built_at, self.target, self.profile)?;
        write!(f, "{}", self.rustc)
    }
}
