//! Repository statistics extraction: commit counts and line ownership.
//!
//! Both pipelines shell out to the git CLI (`shortlog`, `ls-files`,
//! `blame --line-porcelain`) and parse its output; nothing is cached or
//! persisted between runs.

pub mod commits;
mod git;
pub mod ownership;
