//! Property-based tests for stage precedence

use appcfg::config::ConfigLoader;
use proptest::prelude::*;
use tempfile::TempDir;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,12}"
}

/// A later stage replaces exactly the option it sets; the sibling keeps its file value.
#[test]
fn test_later_stage_wins_and_siblings_survive() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(64));

    runner
        .run(
            &(name(), name(), name(), value(), value(), 0usize..4),
            |(section, option, sibling, file_value, later_value, stage)| {
                prop_assume!(option != sibling);

                let temp_dir = TempDir::new().unwrap();
                let base = format!(
                    "[{}]\n{} = {}\n{} = base\n",
                    section, option, file_value, sibling
                );
                std::fs::write(temp_dir.path().join("config.ini"), base).unwrap();

                let key = format!("{}.{}", section, option);
                let override_line = format!("[{}]\n{} = {}\n", section, option, later_value);
                let env_var = format!(
                    "APP_{}_{}",
                    section.to_uppercase(),
                    option.to_uppercase()
                );

                let mut loader = ConfigLoader::new("dev").root(temp_dir.path());
                match stage {
                    0 => std::fs::write(temp_dir.path().join("config.dev.ini"), &override_line)
                        .unwrap(),
                    1 => std::fs::write(temp_dir.path().join("secret.ini"), &override_line)
                        .unwrap(),
                    2 => loader = loader.environment(vec![(env_var, later_value.clone())]),
                    _ => loader = loader.overrides(vec![(key.clone(), later_value.clone())]),
                }

                let store = loader.load().unwrap();
                prop_assert_eq!(store.get_str(&key), Some(later_value.as_str()));
                prop_assert_eq!(
                    store.get_str(&format!("{}.{}", section, sibling)),
                    Some("base")
                );
                Ok(())
            },
        )
        .unwrap();
}

/// Overrides beat environment variables regardless of the values involved.
#[test]
fn test_override_beats_environment_variable() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(64));

    runner
        .run(
            &(name(), name(), value(), value()),
            |(section, option, env_value, cli_value)| {
                let temp_dir = TempDir::new().unwrap();
                let env_var = format!(
                    "APP_{}_{}",
                    section.to_uppercase(),
                    option.to_uppercase()
                );
                let key = format!("{}.{}", section, option);

                let store = ConfigLoader::new("dev")
                    .root(temp_dir.path())
                    .environment(vec![(env_var, env_value)])
                    .overrides(vec![(key.clone(), cli_value.clone())])
                    .load()
                    .unwrap();

                prop_assert_eq!(store.get_str(&key), Some(cli_value.as_str()));
                Ok(())
            },
        )
        .unwrap();
}
