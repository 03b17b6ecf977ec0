//! Steps resolving execution targets against a located suite.

use anyhow::{Result, anyhow, bail, ensure};
use camino::Utf8Path;
use rstest_bdd_macros::{given, then, when};
use systest::suite::SuiteLocator;
use systest::target::{ExecutionTarget, TargetKind, TargetResolver};
use test_helpers::text::{split_list, unquote};

use super::suite_steps::with_tree;
use crate::fixtures::SuiteContext;

const SUITE: &str = "mock";

#[given("the indirection file {name} lists {entries}")]
fn indirection_file(suite_context: &SuiteContext, name: String, entries: String) -> Result<()> {
    let body = split_list(&entries).join("\n") + "\n";
    with_tree(suite_context, |tree| {
        tree.write(unquote(&name), &body)?;
        Ok(())
    })
}

#[when("the targets {expressions} are resolved")]
fn resolve_targets(suite_context: &SuiteContext, expressions: String) -> Result<()> {
    let expressions = split_list(&expressions);
    let resolved = with_tree(suite_context, |tree| {
        let suite = SuiteLocator::new(tree.suites_dir())
            .locate(SUITE)
            .map_err(|err| anyhow!("suite was rejected: {err}"))?;
        Ok(TargetResolver::with_cwd(&suite, tree.suites_dir()).resolve(&expressions))
    })?;
    suite_context.targets.set(resolved);
    Ok(())
}

fn describe(target: &ExecutionTarget, features_dir: &Utf8Path) -> Result<String> {
    let relative = target
        .path()
        .strip_prefix(features_dir)
        .map_err(|_| anyhow!("'{}' is outside '{features_dir}'", target.path()))?;
    Ok(match (target.kind(), target.line()) {
        (TargetKind::Suite, _) => "suite".to_owned(),
        (TargetKind::FeatureArea, _) => format!("area {relative}"),
        (TargetKind::FeatureFile, _) => format!("file {relative}"),
        (TargetKind::Scenario, Some(line)) => format!("scenario {relative}:{line}"),
        (TargetKind::Scenario, None) => bail!("scenario target without a line: {target}"),
    })
}

#[then("the targets are {descriptions}")]
fn targets_are(suite_context: &SuiteContext, descriptions: String) -> Result<()> {
    let expected = split_list(&descriptions);
    let features_dir = with_tree(suite_context, |tree| Ok(tree.features_dir(SUITE)))?;
    suite_context
        .targets
        .with_ref(|targets| {
            let targets = targets
                .as_ref()
                .map_err(|err| anyhow!("resolution failed: {err}"))?;
            let actual = targets
                .iter()
                .map(|target| describe(target, &features_dir))
                .collect::<Result<Vec<_>>>()?;
            ensure!(actual == expected, "targets were {actual:?}");
            Ok(())
        })
        .ok_or_else(|| anyhow!("no targets have been resolved"))?
}

#[then("resolution fails with {text}")]
fn resolution_fails(suite_context: &SuiteContext, text: String) -> Result<()> {
    let targets = suite_context
        .targets
        .take()
        .ok_or_else(|| anyhow!("no targets have been resolved"))?;
    let err = targets
        .err()
        .ok_or_else(|| anyhow!("expected resolution to fail"))?;
    let needle = unquote(&text);
    ensure!(err.to_string().contains(needle), "error was: {err}");
    Ok(())
}
