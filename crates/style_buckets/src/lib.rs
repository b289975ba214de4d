//! Ordered style buckets.
//!
//! Generated rules are grouped into buckets by cascade priority (base rules,
//! `:link`, `:visited`, ... `:active`, keyframes, other at-rules). Each bucket gets
//! its own `<style>` element in the document head, created on first use and
//! placed so that document order always follows [`STYLE_BUCKET_ORDERING`],
//! whatever order the buckets are first requested in.

#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod bucket;
pub mod renderer;
pub mod resolver;
pub mod state;
pub mod target;

pub use bucket::{BUCKET_ATTRIBUTE, STYLE_BUCKET_ORDERING, StyleBucket};
pub use renderer::{CssRulesByBucket, InsertionReport, RendererOptions, StyleRenderer};
pub use resolver::{get_style_sheet_for_bucket, resolve_style_element};
pub use state::RendererState;
pub use target::StyleTarget;
