//! The library code for the `mdsite` static site generator. The architecture
//! can be generally broken down into three distinct passes over directory
//! trees:
//!
//! 1. Converting the source tree into a mirrored output tree of HTML pages
//!    ([`crate::site::Builder::convert_tree`])
//! 2. Generating landing pages for output directories that lack one
//!    ([`crate::site::Builder::write_index_pages`])
//! 3. Assembling a nested navigation menu from the output tree
//!    ([`crate::site::Builder::menu`])
//!
//! The first pass is the only one that looks at the source tree: every
//! directory is mirrored under the output root, every markdown document is
//! converted to an HTML page at the same relative path, and everything else
//! is skipped. The later passes walk the *output* tree, so they see exactly
//! what the first pass produced.
//!
//! A run is all-or-nothing: the first failing read, conversion, or write
//! aborts the whole build with an error naming the failing path. No partial
//! output is cleaned up on failure; the next run starts from a freshly
//! cleaned output directory anyway ([`crate::build::build_site`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod markdown;
pub mod page;
pub mod site;
pub mod title;
