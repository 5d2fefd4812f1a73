//! # dlcup Core Library
//!
//! This crate contains the core logic of the `dlcup` tool – a batch installer that merges
//! COM3D2 DLC packages into an existing game installation.
//!
//! `dlcup` scans a directory of unpacked DLC installer folders, validates their content
//! manifests against the installed state, reduces everything to one winning version per
//! target file, and copies only what is actually newer than the installation.
//!
//! This library is built for the `dlcup` CLI, but you can also reuse it as a backend in other tools.
//!
//! ## Modules Overview
//! - [`manifest`] – Parsing and serialization of `update.lst` manifests (installed state and installer contents)
//! - [`classifier`] – Deciding which installer folders are supported, unsupported, or irrelevant
//! - [`validator`] – Version/size/CRC checks turning manifest entries into install candidates
//! - [`planner`] – Reducing candidates to one highest-version winner per target file
//! - [`installer`] – Applying the plan: copying files and updating the installed state
//! - [`scan`] – Discovering installer folders and driving classification and validation
//! - [`util`] – Shared utilities (install-root lookup, prompts, warnings, path handling)

pub mod classifier;
pub mod installer;
pub mod manifest;
pub mod planner;
pub mod scan;
pub mod util;
pub mod validator;

pub use classifier::*;
pub use installer::*;
pub use manifest::*;
pub use planner::*;
pub use scan::*;
pub use util::*;
pub use validator::*;
