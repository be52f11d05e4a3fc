//! Diagnostics over the kana typing engine, shared by the `kanatool` binary.

pub mod commands;
