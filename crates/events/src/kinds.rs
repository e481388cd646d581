//! Event type table for the marketplace `JobEvent` log.

use std::fmt;

/// Discriminant carried in the envelope's `type_` field.
///
/// Codes above 18 are preserved as `Unknown` so callers can log them; the
/// dispatcher skips them rather than treating them as decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobEventKind {
    Created,
    Taken,
    Paid,
    Updated,
    Signed,
    Completed,
    Delivered,
    Closed,
    Reopened,
    Rated,
    Refunded,
    Disputed,
    Arbitrated,
    ArbitrationRefused,
    WhitelistedWorkerAdded,
    WhitelistedWorkerRemoved,
    CollateralWithdrawn,
    WorkerMessage,
    OwnerMessage,
    Unknown(u8),
}

impl From<u8> for JobEventKind {
    fn from(code: u8) -> Self {
        match code {
            0 => JobEventKind::Created,
            1 => JobEventKind::Taken,
            2 => JobEventKind::Paid,
            3 => JobEventKind::Updated,
            4 => JobEventKind::Signed,
            5 => JobEventKind::Completed,
            6 => JobEventKind::Delivered,
            7 => JobEventKind::Closed,
            8 => JobEventKind::Reopened,
            9 => JobEventKind::Rated,
            10 => JobEventKind::Refunded,
            11 => JobEventKind::Disputed,
            12 => JobEventKind::Arbitrated,
            13 => JobEventKind::ArbitrationRefused,
            14 => JobEventKind::WhitelistedWorkerAdded,
            15 => JobEventKind::WhitelistedWorkerRemoved,
            16 => JobEventKind::CollateralWithdrawn,
            17 => JobEventKind::WorkerMessage,
            18 => JobEventKind::OwnerMessage,
            other => JobEventKind::Unknown(other),
        }
    }
}

impl JobEventKind {
    pub fn code(self) -> u8 {
        match self {
            JobEventKind::Created => 0,
            JobEventKind::Taken => 1,
            JobEventKind::Paid => 2,
            JobEventKind::Updated => 3,
            JobEventKind::Signed => 4,
            JobEventKind::Completed => 5,
            JobEventKind::Delivered => 6,
            JobEventKind::Closed => 7,
            JobEventKind::Reopened => 8,
            JobEventKind::Rated => 9,
            JobEventKind::Refunded => 10,
            JobEventKind::Disputed => 11,
            JobEventKind::Arbitrated => 12,
            JobEventKind::ArbitrationRefused => 13,
            JobEventKind::WhitelistedWorkerAdded => 14,
            JobEventKind::WhitelistedWorkerRemoved => 15,
            JobEventKind::CollateralWithdrawn => 16,
            JobEventKind::WorkerMessage => 17,
            JobEventKind::OwnerMessage => 18,
            JobEventKind::Unknown(code) => code,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, JobEventKind::Unknown(_))
    }
}

/// Human-readable label used as the notification header.
impl fmt::Display for JobEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobEventKind::Created => write!(f, "Job Created"),
            JobEventKind::Taken => write!(f, "Job Taken"),
            JobEventKind::Paid => write!(f, "Job Paid"),
            JobEventKind::Updated => write!(f, "Job Updated"),
            JobEventKind::Signed => write!(f, "Job Signed"),
            JobEventKind::Completed => write!(f, "Job Completed"),
            JobEventKind::Delivered => write!(f, "Job Delivered"),
            JobEventKind::Closed => write!(f, "Job Closed"),
            JobEventKind::Reopened => write!(f, "Job Reopened"),
            JobEventKind::Rated => write!(f, "Job Rated"),
            JobEventKind::Refunded => write!(f, "Job Refunded"),
            JobEventKind::Disputed => write!(f, "Job Disputed"),
            JobEventKind::Arbitrated => write!(f, "Job Arbitrated"),
            JobEventKind::ArbitrationRefused => write!(f, "Arbitration Refused"),
            JobEventKind::WhitelistedWorkerAdded => write!(f, "Whitelisted Worker Added"),
            JobEventKind::WhitelistedWorkerRemoved => write!(f, "Whitelisted Worker Removed"),
            JobEventKind::CollateralWithdrawn => write!(f, "Collateral Withdrawn"),
            JobEventKind::WorkerMessage => write!(f, "Worker Message"),
            JobEventKind::OwnerMessage => write!(f, "Owner Message"),
            JobEventKind::Unknown(code) => write!(f, "Unknown({code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in 0u8..=255 {
            assert_eq!(JobEventKind::from(code).code(), code);
        }
    }

    #[test]
    fn test_known_range() {
        for code in 0u8..=18 {
            assert!(JobEventKind::from(code).is_known());
        }
        assert!(!JobEventKind::from(19).is_known());
        assert_eq!(JobEventKind::from(19), JobEventKind::Unknown(19));
    }

    #[test]
    fn test_labels() {
        assert_eq!(JobEventKind::Created.to_string(), "Job Created");
        assert_eq!(JobEventKind::Taken.to_string(), "Job Taken");
        assert_eq!(
            JobEventKind::ArbitrationRefused.to_string(),
            "Arbitration Refused"
        );
        assert_eq!(
            JobEventKind::CollateralWithdrawn.to_string(),
            "Collateral Withdrawn"
        );
        assert_eq!(JobEventKind::Unknown(42).to_string(), "Unknown(42)");
    }
}
