//! # wireline-core — Wire-Format Primitives for the Wireline Protocol
//!
//! This crate defines the value types exchanged over the wireline JSON
//! protocol: sentinel-aware dates, durations, and date-times, the signed
//! 32-bit hash substrate they share with peer implementations, hash-keyed
//! map and set containers, and bit-packed enum sets. Every other crate in
//! the workspace depends on `wireline-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One hash substrate.** `hash_string` and `hash_combine` reproduce the
//!    peer implementations' signed 32-bit arithmetic bit for bit. Every keyed
//!    container and every value-type hash flows through these two functions.
//!
//! 2. **Sentinels are values.** Positive infinity, negative infinity, and
//!    not-a-date are ordinary members of [`Date`], [`Duration`], and
//!    [`DateTime`], with fixed wire spellings. No `Option` wrapping, no
//!    panics on the edges of time.
//!
//! 3. **Lenient decode, canonical encode.** Decoders walk fixed character
//!    positions and never validate ranges or reject garbage; encoders always
//!    produce the canonical padded spelling. Shape errors (a number where a
//!    string belongs) are the only decode failures.
//!
//! 4. **Validation lives at the boundary.** `to_chrono` conversions are the
//!    one place calendar rules apply, producing `Option` instead of panicking
//!    on impossible dates.
//!
//! 5. **Hash equality tracks value equality.** [`HashKey`] requires
//!    `PartialEq`, and every implementation hashes equal values to equal
//!    codes, so the containers' bucket-then-scan lookups stay correct.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wireline-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public value types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` through their wire spelling.

pub mod date;
pub mod date_time;
pub mod duration;
pub mod enum_set;
pub mod error;
pub mod hash;
pub mod json;
pub mod map;
pub mod set;

// Re-export primary types for ergonomic imports.
pub use date::Date;
pub use date_time::DateTime;
pub use duration::{Duration, TimeParts};
pub use enum_set::{BitIndex, EnumSet};
pub use error::WireError;
pub use hash::{hash_combine, hash_string, HashCode, HashKey};
pub use json::{FromJson, ToJson};
pub use map::WireMap;
pub use set::WireSet;
