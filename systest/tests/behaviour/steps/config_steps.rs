//! Steps exercising tier loading and merging.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest_bdd_macros::{given, then, when};
use systest::config::{CliValues, ConfigLoader, Tier, merge_sources};
use tempfile::TempDir;
use test_helpers::text::{split_list, unquote};

use crate::fixtures::ConfigContext;

#[given("the environment sets {name} to {value}")]
fn env_var(config_context: &ConfigContext, name: String, value: String) -> Result<()> {
    let mut env = config_context.env.get_or_insert_with(Vec::new);
    env.push((unquote(&name).to_owned(), unquote(&value).to_owned()));
    Ok(())
}

#[given("the user configuration file contains {line}")]
fn user_file(config_context: &ConfigContext, line: String) -> Result<()> {
    ensure!(config_context.user_file.is_empty(), "user file already written");
    config_context.user_file.set(unquote(&line).to_owned());
    Ok(())
}

#[given("the project configuration file contains {line}")]
fn project_file(config_context: &ConfigContext, line: String) -> Result<()> {
    ensure!(config_context.project_file.is_empty(), "project file already written");
    config_context.project_file.set(unquote(&line).to_owned());
    Ok(())
}

#[given("the explicit configuration file contains {line}")]
fn explicit_file(config_context: &ConfigContext, line: String) -> Result<()> {
    ensure!(config_context.explicit_file.is_empty(), "explicit file already written");
    config_context.explicit_file.set(unquote(&line).to_owned());
    Ok(())
}

#[given("the command line sets {key} to {value}")]
fn cli_scalar(config_context: &ConfigContext, key: String, value: String) -> Result<()> {
    let mut cli = config_context.cli.get_or_insert_with(CliValues::new);
    cli.set(unquote(&key), unquote(&value));
    Ok(())
}

#[given("the command line adds {values} to {key}")]
fn cli_list(config_context: &ConfigContext, values: String, key: String) -> Result<()> {
    let mut cli = config_context.cli.get_or_insert_with(CliValues::new);
    cli.extend(unquote(&key), split_list(&values));
    Ok(())
}

#[when("the configuration is resolved")]
fn resolve_configuration(config_context: &ConfigContext) -> Result<()> {
    let tmp = TempDir::new()?;
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
        .map_err(|path| anyhow!("non UTF-8 temporary path: {}", path.display()))?;
    let home = root.join("home");
    let project = root.join("project");
    std::fs::create_dir_all(&home)?;
    std::fs::create_dir_all(&project)?;

    let mut loader = ConfigLoader::new()
        .env_pairs(config_context.env.take().unwrap_or_default())
        .home_dir(&home)
        .project_dir(&project);
    if let Some(contents) = config_context.user_file.take() {
        std::fs::write(home.join(".systest"), contents + "\n")?;
    }
    if let Some(contents) = config_context.project_file.take() {
        std::fs::write(project.join(".env"), contents + "\n")?;
    }
    if let Some(contents) = config_context.explicit_file.take() {
        let explicit = root.join("explicit.conf");
        std::fs::write(&explicit, contents + "\n")?;
        loader = loader.explicit_file(explicit);
    }
    let cli = config_context.cli.take().unwrap_or_default();
    let result = loader
        .load()
        .and_then(|sources| merge_sources(&sources, &cli));
    config_context.result.set(result);
    Ok(())
}

fn with_config<T>(
    config_context: &ConfigContext,
    check: impl FnOnce(&systest::config::ResolvedConfiguration) -> Result<T>,
) -> Result<T> {
    config_context
        .result
        .with_ref(|result| match result {
            Ok(config) => check(config),
            Err(err) => Err(anyhow!("resolution failed: {err}")),
        })
        .ok_or_else(|| anyhow!("configuration has not been resolved"))?
}

#[then("the setting {key} resolves to {value}")]
fn resolves_to(config_context: &ConfigContext, key: String, value: String) -> Result<()> {
    with_config(config_context, |config| {
        let actual = config.scalar(unquote(&key));
        ensure!(actual == Some(unquote(&value)), "{key} resolved to {actual:?}");
        Ok(())
    })
}

#[then("the list {key} resolves to {values}")]
fn resolves_to_list(config_context: &ConfigContext, key: String, values: String) -> Result<()> {
    with_config(config_context, |config| {
        let actual = config.list(unquote(&key));
        let expected = split_list(&values);
        ensure!(actual == expected.as_slice(), "{key} resolved to {actual:?}");
        Ok(())
    })
}

#[then("the setting {key} comes from the {tier}")]
fn comes_from(config_context: &ConfigContext, key: String, tier: String) -> Result<()> {
    let expected = Tier::ALL
        .into_iter()
        .find(|candidate| candidate.to_string() == tier)
        .ok_or_else(|| anyhow!("unknown tier '{tier}'"))?;
    with_config(config_context, |config| {
        let winning = config
            .provenance(unquote(&key))
            .and_then(systest::config::Provenance::winning);
        ensure!(winning == Some(expected), "{key} came from {winning:?}");
        Ok(())
    })
}

#[then("resolution fails mentioning {text}")]
fn fails_mentioning(config_context: &ConfigContext, text: String) -> Result<()> {
    let result = config_context
        .result
        .take()
        .ok_or_else(|| anyhow!("configuration has not been resolved"))?;
    let err = result
        .err()
        .ok_or_else(|| anyhow!("expected resolution to fail"))?;
    let needle = unquote(&text);
    ensure!(err.to_string().contains(needle), "error was: {err}");
    Ok(())
}
