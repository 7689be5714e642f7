//! Assertion failure errors.

use std::fmt;

use jdeq_diff::DiffNode;

/// Maximum number of differences reported in one failure message.
///
/// The assertion layer pulls at most one record past this cap, so a
/// comparison with thousands of differences still does bounded work.
pub const MAX_REPORTED_DIFFERENCES: usize = 20;

/// An equality assertion failed: the values are not equal.
///
/// Holds the bounded prefix of differences that was collected. The
/// `Display` form is the full multi-line report, suitable as a panic
/// message.
#[derive(Debug)]
pub struct EqualError {
    differences: Vec<DiffNode>,
}

impl EqualError {
    /// Collect a bounded prefix of a difference sequence, or `None` when
    /// the sequence is empty (the values are equal).
    pub(crate) fn collect(
        differences: impl Iterator<Item = DiffNode>,
    ) -> Option<Self> {
        let differences: Vec<DiffNode> =
            differences.take(MAX_REPORTED_DIFFERENCES + 1).collect();
        if differences.is_empty() {
            None
        } else {
            Some(Self { differences })
        }
    }

    /// The differences that caused this failure, capped at one past
    /// [`MAX_REPORTED_DIFFERENCES`].
    pub fn differences(&self) -> &[DiffNode] {
        &self.differences
    }

    /// `"N"` for a fully-counted failure, `"N+"` when the sequence was cut
    /// off at the cap.
    pub fn count_display(&self) -> String {
        if self.differences.len() > MAX_REPORTED_DIFFERENCES {
            format!("{MAX_REPORTED_DIFFERENCES}+")
        } else {
            self.differences.len().to_string()
        }
    }
}

impl fmt::Display for EqualError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.differences.len() == 1 { "" } else { "s" };
        write!(
            f,
            "deep equality assertion failed: {} difference{plural}",
            self.count_display()
        )?;
        for difference in &self.differences {
            write!(f, "\n{difference}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EqualError {}

/// An inequality assertion failed: the values are equal.
#[derive(Debug, thiserror::Error)]
#[error("deep inequality assertion failed: the values are equivalent")]
pub struct NotEqualError;

/// Any failure from the assertion entry points.
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    /// A JSON document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] jdeq_diff::DiffError),

    /// A value could not be serialized into a tree.
    #[error("serialization error: {0}")]
    Serialize(#[from] jdeq_serde::SerializeError),

    /// The equality assertion failed.
    #[error(transparent)]
    Differences(#[from] EqualError),

    /// The inequality assertion failed.
    #[error(transparent)]
    Equivalent(#[from] NotEqualError),
}
