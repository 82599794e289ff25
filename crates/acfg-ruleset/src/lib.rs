//! # acfg-ruleset — Static Validation Ruleset Snapshots
//!
//! Turns the live capability description of a remote data API into a
//! static ruleset file that a response validator can load at start-up
//! instead of querying the server. A validator initialised from a pinned
//! snapshot errors on operation types, statuses or errors introduced by a
//! later server update rather than silently accepting them.
//!
//! ## Stages
//!
//! 1. **Fetch**: one [`MetadataSource`](acfg_client::MetadataSource) call.
//! 2. **Derive**: [`derive_ruleset()`], a pure function of the metadata.
//! 3. **Render**: [`render()`], indented JSON in declaration field order.
//! 4. **Persist**: [`persist()`], atomic replace with owner-only permissions.
//!
//! [`generate()`] runs all four; [`check()`] runs the first three and
//! compares the result with an existing artifact.
//!
//! ## Determinism
//!
//! Sets are sorted, sequences keep source order, mappings are `BTreeMap`s,
//! and nothing reads the clock. The same metadata always renders to the
//! same bytes.

pub mod derive;
pub mod error;
pub mod generate;
pub mod persist;
pub mod render;
pub mod ruleset;

pub use derive::derive_ruleset;
pub use error::{DerivationError, GenerateError, ParseError, PersistenceError};
pub use generate::{check, generate, CheckOutcome, Snapshot};
pub use persist::{persist, FILE_MODE};
pub use render::{parse, render, INDENT};
pub use ruleset::{AllowedError, CurrencyDescriptor, ValidationRuleset};
