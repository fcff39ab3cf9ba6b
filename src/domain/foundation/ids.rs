//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generates a UUID-backed identifier newtype with the usual constructors,
/// `Display` and `FromStr`.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a project.
    ProjectId
);

uuid_id!(
    /// Unique identifier for a contract.
    ContractId
);

uuid_id!(
    /// Unique identifier for a reporting period.
    ReportingPeriodId
);

uuid_id!(
    /// Unique identifier for a user's report within a period.
    ReportId
);

uuid_id!(
    /// Unique identifier for a progress report snapshot.
    ProgressReportId
);

uuid_id!(
    /// Unique identifier for a reporting user.
    UserId
);

uuid_id!(
    /// Unique identifier for a team.
    TeamId
);

uuid_id!(
    /// Unique identifier for a role.
    RoleId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(ContractId::new(), ContractId::new());
    }

    #[test]
    fn id_round_trips_through_display_and_from_str() {
        let id = ReportingPeriodId::new();
        let parsed: ReportingPeriodId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_from_str_rejects_garbage() {
        assert!("not-a-uuid".parse::<ContractId>().is_err());
    }

    #[test]
    fn id_serializes_as_plain_uuid_string() {
        let uuid = Uuid::new_v4();
        let id = ProgressReportId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
