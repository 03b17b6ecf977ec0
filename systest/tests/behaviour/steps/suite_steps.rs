//! Steps building suite trees and validating their structure.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{given, then, when};
use systest::suite::SuiteLocator;
use test_helpers::suite::SuiteTree;
use test_helpers::text::{split_list, unquote};

use crate::fixtures::SuiteContext;

/// Runs `f` against the scenario's suite tree, creating the tree on first use.
pub fn with_tree<T>(
    suite_context: &SuiteContext,
    f: impl FnOnce(&SuiteTree) -> Result<T>,
) -> Result<T> {
    if suite_context.tree.is_empty() {
        suite_context.tree.set(SuiteTree::new()?);
    }
    suite_context
        .tree
        .with_ref(f)
        .ok_or_else(|| anyhow!("suite tree is missing"))?
}

#[given("a suite {name} with feature areas {areas}")]
fn suite_with_areas(suite_context: &SuiteContext, name: String, areas: String) -> Result<()> {
    let areas = split_list(&areas);
    let borrowed: Vec<&str> = areas.iter().map(String::as_str).collect();
    with_tree(suite_context, |tree| {
        tree.valid_suite(unquote(&name), &borrowed)?;
        Ok(())
    })
}

#[given("a scaffolded suite {name}")]
fn scaffolded_suite(suite_context: &SuiteContext, name: String) -> Result<()> {
    with_tree(suite_context, |tree| {
        systest::create_suite(unquote(&name), tree.suites_dir())
            .map_err(|err| anyhow!("scaffolding failed: {err}"))?;
        Ok(())
    })
}

#[given("the path {path} is removed")]
fn path_removed(suite_context: &SuiteContext, path: String) -> Result<()> {
    with_tree(suite_context, |tree| tree.remove(unquote(&path)))
}

#[given("the file {path} exists")]
fn file_exists(suite_context: &SuiteContext, path: String) -> Result<()> {
    with_tree(suite_context, |tree| {
        tree.write(unquote(&path), "")?;
        Ok(())
    })
}

#[when("the suite {name} is located")]
fn locate_suite(suite_context: &SuiteContext, name: String) -> Result<()> {
    let located = with_tree(suite_context, |tree| {
        Ok(SuiteLocator::new(tree.suites_dir()).locate(unquote(&name)))
    })?;
    suite_context.located.set(located);
    Ok(())
}

#[then("the suite is valid with areas {areas}")]
fn suite_is_valid(suite_context: &SuiteContext, areas: String) -> Result<()> {
    let expected = split_list(&areas);
    suite_context
        .located
        .with_ref(|located| {
            let suite = located
                .as_ref()
                .map_err(|err| anyhow!("suite was rejected: {err}"))?;
            let names: Vec<&str> = suite.areas().iter().map(|area| area.name()).collect();
            ensure!(names == expected, "areas were {names:?}");
            Ok(())
        })
        .ok_or_else(|| anyhow!("no suite has been located"))?
}

#[then("validation fails mentioning {text}")]
fn validation_fails(suite_context: &SuiteContext, text: String) -> Result<()> {
    let located = suite_context
        .located
        .take()
        .ok_or_else(|| anyhow!("no suite has been located"))?;
    let err = located
        .err()
        .ok_or_else(|| anyhow!("expected the suite to be rejected"))?;
    let needle = unquote(&text);
    ensure!(err.to_string().contains(needle), "error was: {err}");
    Ok(())
}
