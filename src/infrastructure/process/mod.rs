//! Process execution infrastructure

pub mod shell;

pub use shell::{ShellCommandRunner, ShellConfig};
