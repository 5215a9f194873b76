//! # Attrkit Architecture
//!
//! Attrkit is a **typed attribute value library**: a single dynamically tagged value
//! that can hold one of a closed set of domain types, with a total cast between
//! any two of them, tag inference from free-form text, and a cross-type total order.
//! The command-line client is one thin consumer of the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, cli/, wired by main.rs)                │
//! │  - Parses arguments, formats output, installs logging       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the evaluation context built from config            │
//! │  - Normalizes inputs (tag names → AttributeType)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - parse / cast / compare / sort / types / config           │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (attr/, primitives, registry, resolver, clock)        │
//! │  - AttributeValue, cast, parse, compare                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Injected Effects
//!
//! Everything in the core is a pure function of its inputs except three lookups,
//! which are carried by [`context::AttrContext`]:
//!
//! - the clock behind the DATE/TIMESTAMP "now" default,
//! - the host resolver behind INET_ADDRESS inference,
//! - the type registry behind TYPE_REF and ENUM_REF.
//!
//! Context-free entry points use [`context::AttrContext::global`]. Tests pin the
//! clock with [`clock::FixedClock`].
//!
//! ## Module Overview
//!
//! - [`attr`]: The typed value, cast engine, parser and comparator
//! - [`primitives`]: Payload types (`Color`, `Point2d`, `Point3d`, `Image`, ...)
//! - [`registry`]: Known type names and enumerations
//! - [`resolver`]: Host name resolution
//! - [`clock`]: Time source
//! - [`context`]: The bundle of the above
//! - [`api`]: The API facade
//! - [`commands`]: Logic behind each CLI command
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attr;
pub mod clock;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod primitives;
pub mod registry;
pub mod resolver;

pub use attr::{parse, Attribute, AttributeError, AttributeType, AttributeValue, Value};
