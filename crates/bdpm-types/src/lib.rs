//! # bdpm-types
//!
//! Type definitions for the BDPM public drug registry.
//!
//! This crate provides Rust type definitions for the five entity kinds
//! distributed in the BDPM tab-separated files — specialties, compositions,
//! presentations, prescription conditions, and generic-equivalence groups —
//! plus the composite record types produced by cross-referencing them.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use bdpm_types::{CisCode, MemberRole, Specialty};
//!
//! let specialty = Specialty {
//!     cis: 60234100,
//!     name: "DOLIPRANE 1000 mg, comprimé".to_string(),
//!     pharmaceutical_form: "comprimé".to_string(),
//!     administration_routes: "orale".to_string(),
//!     authorization_status: "Autorisation active".to_string(),
//!     procedure_type: "Procédure nationale".to_string(),
//!     marketing_status: "Commercialisée".to_string(),
//!     authorization_date: Some(20020722),
//!     bdm_status: None,
//!     european_authorization: None,
//!     holders: "SANOFI".to_string(),
//!     enhanced_surveillance: false,
//! };
//!
//! assert!(specialty.is_authorization_active());
//! assert_eq!(MemberRole::from_code(0), Some(MemberRole::Reference));
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! bdpm-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod cis;
mod composition;
mod condition;
mod enums;
mod generic;
mod presentation;
mod record;
mod specialty;

// Re-export all public types at crate root
pub use cis::{Cip13, Cip7, CisCode, GroupId};
pub use composition::Composition;
pub use condition::PrescriptionCondition;
pub use enums::{ComponentNature, MemberRole};
pub use generic::{GenericGroup, GenericRow, GroupMember};
pub use presentation::Presentation;
pub use record::SpecialtyRecord;
pub use specialty::Specialty;
