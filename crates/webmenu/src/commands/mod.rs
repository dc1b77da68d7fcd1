//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod tree;

pub(crate) use build::BuildArgs;
pub(crate) use tree::TreeArgs;
