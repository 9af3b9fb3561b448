use std::fmt;

/// Widest inventory whose subsets can be indexed by a `usize` mask.
pub const MAX_FEATURES: usize = usize::BITS as usize - 1;

/// Error type for inventories the planner cannot enumerate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// More flags than bits in a subset mask
    TooManyFeatures { count: usize },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::TooManyFeatures { count } => write!(
                f,
                "{} features cannot be enumerated (at most {} are supported)",
                count, MAX_FEATURES
            ),
        }
    }
}

impl std::error::Error for PlanError {}

/// Returns every subset of `flags`, the empty one included.
///
/// Subset `i` holds `flags[b]` for each bit `b` set in `i`, so the output is
/// deterministic for a given input order and members keep declaration order.
/// The result has `2^n` entries; callers are expected to keep `n` small.
pub fn power_set<S: AsRef<str>>(flags: &[S]) -> Result<Vec<Vec<String>>, PlanError> {
    let n = flags.len();
    let count = u32::try_from(n)
        .ok()
        .and_then(|bits| 1usize.checked_shl(bits))
        .ok_or(PlanError::TooManyFeatures { count: n })?;

    Ok((0..count)
        .map(|mask| {
            flags
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, flag)| flag.as_ref().to_string())
                .collect()
        })
        .collect())
}
