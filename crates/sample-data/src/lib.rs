//! Synthetic user records and JSON file persistence for DataGen.
//!
//! This crate holds the parts of DataGen that do not depend on a language
//! model: it can be used directly to seed fixtures or tests.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Validating generation requests with ordered, user-facing error messages
//! - Generating user records from name, domain, and city lists using an
//!   injected clock instant and random source
//! - Writing and reading pretty-printed JSON files, either as typed results
//!   or as status strings suitable for tool output
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use sample_data::{GenerationRequest, GenerationResult, generate_users};
//!
//! let request = GenerationRequest {
//!     first_names: vec!["John".to_owned(), "Jane".to_owned(), "Mike".to_owned()],
//!     last_names: vec!["Smith".to_owned()],
//!     domains: vec!["company.com".to_owned()],
//!     min_age: 25,
//!     max_age: 35,
//!     cities: vec!["Rome".to_owned(), "Oslo".to_owned()],
//! };
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(2026);
//! let result = GenerationResult::from(generate_users(&request, Utc::now(), &mut rng));
//!
//! let GenerationResult::Users(generated) = result else {
//!     panic!("request is valid");
//! };
//! assert_eq!(generated.count, 3);
//! ```

mod atomic_io;
mod error;
mod generator;
mod json_file;
mod record;
mod result;
mod validation;

pub use error::{GenerationError, JsonFileError};
pub use generator::generate_users;
pub use json_file::{read_json, read_json_file, write_json, write_json_file};
pub use record::{GeneratedUsers, GenerationRequest, UserRecord};
pub use result::GenerationResult;
pub use validation::validate_request;
