//! # confpatch
//!
//! Byte-preserving patch engine for section-structured daemon configuration
//! files such as `svxlink.conf`.
//!
//! This crate provides functionality for:
//! - Reading a configuration file into an immutable line snapshot
//! - Replacing `KEY=VALUE` lines in place
//! - Enabling or disabling a section-scoped key by commenting it in or out
//! - Inserting an enabled key into its section when it is missing
//! - Writing the result back atomically
//!
//! Every line the request does not name comes back byte-for-byte identical.
//!
//! ## Example
//!
//! ```no_run
//! use confpatch::{ConfigDocument, GovernedKey, UpdateRequest};
//! use std::path::Path;
//!
//! let path = Path::new("/etc/svxlink/svxlink.conf");
//! let document = ConfigDocument::read(path).expect("readable config");
//!
//! let pty = GovernedKey::new("SimplexLogic", "DTMF_CTRL_PTY", "/dev/shm/dtmf_ctrl");
//! let request = UpdateRequest::new()
//!     .set("CALLSIGN", "CA2XYZ")
//!     .toggle(pty, true, None);
//!
//! let outcome = confpatch::patch(&document, &request);
//! for skipped in &outcome.skipped {
//!     eprintln!("warning: {skipped}");
//! }
//! confpatch::write_atomic(path, outcome.to_bytes()).expect("writable config");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod line;
pub mod lookup;
pub mod patcher;
pub mod persist;
pub mod request;

pub use document::ConfigDocument;
pub use error::{Error, ErrorCategory, Result};
pub use line::KeyLine;
pub use lookup::{lookup, lookup_or};
pub use patcher::{Edit, EditKind, PatchOutcome, patch};
pub use persist::write_atomic;
pub use request::{GovernedKey, Toggle, UpdateRequest};
