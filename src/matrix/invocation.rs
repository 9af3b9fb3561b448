use super::plan::Configuration;
use serde::Serialize;
use std::fmt;

/// Toolchain subcommands run for every configuration, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandVerb {
    Check,
    Lint,
    Test,
}

impl CommandVerb {
    /// Dispatch order within a configuration.
    pub const ALL: [CommandVerb; 3] = [CommandVerb::Check, CommandVerb::Lint, CommandVerb::Test];

    /// Subcommand name passed to the toolchain binary.
    pub fn subcommand(&self) -> &'static str {
        match self {
            CommandVerb::Check => "check",
            CommandVerb::Lint => "clippy",
            CommandVerb::Test => "test",
        }
    }

    /// `cargo test --all-targets` skips doctests, so tests run on default targets.
    pub fn target_scope(&self) -> TargetScope {
        match self {
            CommandVerb::Check | CommandVerb::Lint => TargetScope::AllTargets,
            CommandVerb::Test => TargetScope::Default,
        }
    }
}

impl fmt::Display for CommandVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// Whether auxiliary targets (examples, benches, tests) are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetScope {
    AllTargets,
    Default,
}

/// Everything needed to spawn one toolchain process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationDescriptor {
    pub module: String,
    pub verb: CommandVerb,
    pub configuration: Configuration,
    pub scope: TargetScope,
    /// Zero-based position of `configuration` in the module's plan.
    pub index: usize,
    /// Number of configurations in the module's plan.
    pub total: usize,
}

impl InvocationDescriptor {
    /// Arguments after the toolchain binary:
    /// `<verb> --package <module> [--all-targets] <configuration args>`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.verb.subcommand().to_string(),
            "--package".to_string(),
            self.module.clone(),
        ];
        if self.scope == TargetScope::AllTargets {
            args.push("--all-targets".to_string());
        }
        args.extend(self.configuration.args());
        args
    }

    /// Line printed before dispatch, e.g.
    /// `>> [dxr] [0002/0017] cargo clippy --no-default-features --features i8`.
    pub fn progress_line(&self, toolchain: &str) -> String {
        format!(
            ">> [{}] [{:04}/{:04}] {} {} {}",
            self.module, self.index, self.total, toolchain, self.verb, self.configuration
        )
    }
}

/// One descriptor per verb for a configuration, in dispatch order.
pub fn sequence(
    module: &str,
    configuration: &Configuration,
    index: usize,
    total: usize,
) -> [InvocationDescriptor; 3] {
    CommandVerb::ALL.map(|verb| InvocationDescriptor {
        module: module.to_string(),
        verb,
        configuration: configuration.clone(),
        scope: verb.target_scope(),
        index,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(flags: &[&str]) -> Configuration {
        Configuration::Features(flags.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_verb_order() {
        let descriptors = sequence("dxr", &Configuration::AllFeatures, 0, 17);
        let verbs: Vec<_> = descriptors.iter().map(|d| d.verb).collect();
        assert_eq!(
            verbs,
            vec![CommandVerb::Check, CommandVerb::Lint, CommandVerb::Test]
        );
    }

    #[test]
    fn test_only_test_drops_all_targets() {
        for configuration in [
            Configuration::AllFeatures,
            Configuration::NoFeatures,
            subset(&["derive", "i8"]),
        ] {
            let [check, lint, test] = sequence("dxr", &configuration, 3, 17);
            assert!(check.args().contains(&"--all-targets".to_string()));
            assert!(lint.args().contains(&"--all-targets".to_string()));
            assert!(!test.args().contains(&"--all-targets".to_string()));
        }
    }

    #[test]
    fn test_args_shape() {
        let [check, _, test] = sequence("dxr_client", &subset(&["reqwest", "rustls-tls"]), 4, 65);
        assert_eq!(
            check.args(),
            vec![
                "check",
                "--package",
                "dxr_client",
                "--all-targets",
                "--no-default-features",
                "--features",
                "reqwest,rustls-tls",
            ]
        );
        assert_eq!(
            test.args(),
            vec![
                "test",
                "--package",
                "dxr_client",
                "--no-default-features",
                "--features",
                "reqwest,rustls-tls",
            ]
        );
    }

    #[test]
    fn test_progress_line() {
        let [_, lint, _] = sequence("dxr", &Configuration::NoFeatures, 1, 17);
        assert_eq!(
            lint.progress_line("cargo"),
            ">> [dxr] [0001/0017] cargo clippy --no-default-features"
        );
    }
}
