/*!
 * Core Types
 * Common types used across the crate
 */

/// Position of a header unit inside an arena
pub type Address = usize;

/// Size counted in header units, never raw bytes
pub type Units = usize;

/// Size counted in bytes
pub type Size = usize;
