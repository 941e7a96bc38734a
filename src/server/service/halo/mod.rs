//! Halo Waypoint upstream client.
//!
//! Everything outbound to Xbox Live and the Waypoint services lives here:
//! the five-stage token chain, the request envelope that stamps auth headers
//! onto data calls, the batched fan-out and pagination engine, and the static
//! career rank ladder.

pub mod chain;
pub mod client;
pub mod envelope;
pub mod rank;
pub mod transport;

#[cfg(test)]
mod test;

/// User agent the upstream expects on every request.
pub const HALO_WAYPOINT_USER_AGENT: &str =
    "HaloWaypoint/2021112313511900 CFNetwork/1327.0.4 Darwin/21.2.0";
