//! Component history domain
//!
//! Pure logic for turning Dockerfile revisions into component records:
//! domain types, parsing/aggregation/filter services, and column policies.
//! Nothing in here touches the network or the filesystem.

pub mod domain;
pub mod policies;
pub mod services;
