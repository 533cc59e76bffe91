//! Phonetrace — phone number to approximate service-area map.
//!
//! A one-shot lookup pipeline: parse and validate a number, derive its
//! offline region and carrier descriptors, geocode the region description,
//! resolve a local-time snapshot, render a self-contained HTML map, and
//! write, verify, and open the artifact.
//!
//! Phone-number geolocation is inherently coarse. Everything here resolves
//! a service area (country, region, or carrier coverage), never a device.

pub mod localtime;
pub mod location;
pub mod map;
pub mod number;
pub mod report;
