//! Builder API for ergonomic store construction.
//!
//! # Example
//!
//! ```
//! use roster::builder::StoreBuilder;
//! use roster::core::UserRecord;
//!
//! let store = StoreBuilder::new()
//!     .user(UserRecord::new(1, "Ann", 30, "http://x/a.png"))
//!     .counter(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.users().len(), 1);
//! ```

pub mod error;
pub mod store;

pub use error::BuildError;
pub use store::StoreBuilder;
