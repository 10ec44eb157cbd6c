//! Services over the document store.
//!
//! Each service owns one area of the domain: drills (creation, cached listing, seeding),
//! attempts (scoring, persistence, history) and users (registration, lookup).

pub mod attempts;
pub mod drills;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
