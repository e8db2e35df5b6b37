//! # rectool
//!
//! Interactive record keeping for submodules.
//!
//! `rectool` lets a user define the field schema of a submodule folder once,
//! then add named instances that follow it. Every added instance is stored
//! as `<instance>/info.json` and its marked fields are copied into the
//! folder's `metadata.json` index.
//!
//! ## Features
//!
//! - **Schema definition**: nested objects and arrays, defined field by field
//! - **Record entry**: prompts driven by the stored schema
//! - **Metadata index**: per-instance projection of the marked fields
//! - **Configuration**: optional `.rectool.toml` in the workspace
//!
//! ## Modules
//!
//! - [`action`] - The `submodule` and `add` actions
//! - [`config`] - Tool configuration file
//! - [`ctx`] - Application context and state management
//!
//! ## Example
//!
//! ```rust,no_run
//! // rectool is primarily used as a CLI tool
//! // See the binary target for usage
//! ```

/// The `submodule` and `add` actions.
pub mod action;

/// Tool configuration loaded from `.rectool.toml`.
pub mod config;

/// Application context and state management.
pub mod ctx;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;
