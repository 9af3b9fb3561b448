use super::powerset::{PlanError, power_set};
use serde::Serialize;
use std::fmt;

/// One feature selection to exercise for a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "features")]
pub enum Configuration {
    /// `--all-features`
    AllFeatures,
    /// `--no-default-features`
    NoFeatures,
    /// `--no-default-features --features a,b`. Never empty.
    Features(Vec<String>),
}

impl Configuration {
    /// Toolchain arguments selecting this configuration.
    pub fn args(&self) -> Vec<String> {
        match self {
            Configuration::AllFeatures => vec!["--all-features".to_string()],
            Configuration::NoFeatures => vec!["--no-default-features".to_string()],
            Configuration::Features(flags) => vec![
                "--no-default-features".to_string(),
                "--features".to_string(),
                flags.join(","),
            ],
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}

/// Builds the ordered configuration list for a feature inventory.
///
/// The extremes always come first, in this order, followed by every
/// non-empty subset of `flags`. For `n` flags that is `2^n + 1` entries.
pub fn plan_configurations<S: AsRef<str>>(flags: &[S]) -> Result<Vec<Configuration>, PlanError> {
    let mut configurations = vec![Configuration::AllFeatures, Configuration::NoFeatures];
    configurations.extend(
        power_set(flags)?
            .into_iter()
            .filter(|subset| !subset.is_empty())
            .map(Configuration::Features),
    );
    Ok(configurations)
}

/// Number of configurations [`plan_configurations`] yields for `n` flags.
/// Saturates instead of overflowing so it is safe to report on huge inventories.
pub fn configuration_count(n: usize) -> usize {
    u32::try_from(n)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .map_or(usize::MAX, |subsets| subsets.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn features(list: &[&str]) -> Configuration {
        Configuration::Features(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_no_flags_yields_only_extremes() {
        let plan = plan_configurations::<&str>(&[]).unwrap();
        assert_eq!(
            plan,
            vec![Configuration::AllFeatures, Configuration::NoFeatures]
        );
        assert_eq!(configuration_count(0), 2);
    }

    #[test]
    fn test_configuration_count_saturates() {
        assert_eq!(configuration_count(4), 17);
        assert_eq!(configuration_count(200), usize::MAX);
    }

    #[test]
    fn test_two_flags() {
        let plan = plan_configurations(&["a", "b"]).unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[0], Configuration::AllFeatures);
        assert_eq!(plan[1], Configuration::NoFeatures);

        let explicit: HashSet<_> = plan[2..].iter().cloned().collect();
        let expected: HashSet<_> = [features(&["a"]), features(&["b"]), features(&["a", "b"])]
            .into_iter()
            .collect();
        assert_eq!(explicit, expected);
    }

    #[test]
    fn test_count_matches_formula() {
        for n in 0..8 {
            let flags: Vec<String> = (0..n).map(|i| format!("f{i}")).collect();
            let plan = plan_configurations(&flags).unwrap();
            assert_eq!(plan.len(), configuration_count(n));

            let unique: HashSet<_> = plan.iter().collect();
            assert_eq!(unique.len(), plan.len());
        }
    }

    #[test]
    fn test_empty_subset_never_explicit() {
        let plan = plan_configurations(&["x", "y", "z"]).unwrap();
        assert!(
            plan.iter()
                .all(|c| !matches!(c, Configuration::Features(f) if f.is_empty()))
        );
    }

    #[test]
    fn test_idempotent() {
        let flags = ["derive", "multicall", "i8"];
        assert_eq!(
            plan_configurations(&flags).unwrap(),
            plan_configurations(&flags).unwrap()
        );
    }

    #[test]
    fn test_args_rendering() {
        assert_eq!(Configuration::AllFeatures.to_string(), "--all-features");
        assert_eq!(Configuration::NoFeatures.to_string(), "--no-default-features");
        assert_eq!(
            features(&["derive", "nil"]).args(),
            vec!["--no-default-features", "--features", "derive,nil"]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(features(&["a"])).unwrap();
        assert_eq!(json["kind"], "features");
        assert_eq!(json["features"][0], "a");

        let json = serde_json::to_value(Configuration::AllFeatures).unwrap();
        assert_eq!(json["kind"], "all-features");
    }
}
