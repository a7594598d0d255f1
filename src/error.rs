//! Error type shared by instance validation, configuration and parsing.

use thiserror::Error;

/// Errors raised while building instances, validating configuration or
/// reading instance files.
///
/// Search itself never fails: an operator that finds no legal move returns
/// its input unchanged.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The node set has no depot (or the depot id points nowhere).
    #[error("depot not found")]
    DepotNotFound,

    /// Vehicle capacity must be strictly positive.
    #[error("vehicle capacity must be positive, got {0}")]
    InvalidCapacity(i32),

    /// A client carries a negative demand.
    #[error("client {id} has negative demand {demand}")]
    NegativeDemand {
        /// Client id.
        id: usize,
        /// Offending demand.
        demand: i32,
    },

    /// A single client demands more than one vehicle can carry.
    #[error("client {id} demand {demand} exceeds vehicle capacity {capacity}")]
    DemandExceedsCapacity {
        /// Client id.
        id: usize,
        /// Client demand.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },

    /// Two nodes share an id, or a client reuses the depot's id.
    #[error("duplicate node id {id}")]
    DuplicateClient {
        /// Repeated id.
        id: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An instance file line could not be interpreted.
    #[error("failed to parse instance at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Reading an instance file failed.
    #[error("failed to read instance file")]
    Io(#[from] std::io::Error),

    /// A JSON configuration document could not be decoded.
    #[error("failed to decode configuration")]
    ConfigFormat(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depot_not_found_message() {
        assert_eq!(RoutingError::DepotNotFound.to_string(), "depot not found");
    }

    #[test]
    fn test_demand_message() {
        let err = RoutingError::DemandExceedsCapacity {
            id: 7,
            demand: 40,
            capacity: 30,
        };
        assert_eq!(
            err.to_string(),
            "client 7 demand 40 exceeds vehicle capacity 30"
        );
    }

    #[test]
    fn test_duplicate_message() {
        assert_eq!(
            RoutingError::DuplicateClient { id: 4 }.to_string(),
            "duplicate node id 4"
        );
    }

    #[test]
    fn test_parse_message() {
        let err = RoutingError::Parse {
            line: 12,
            message: "invalid demand: x".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse instance at line 12: invalid demand: x"
        );
    }
}
