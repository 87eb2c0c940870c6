use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::errors::TreeResult;
use crate::node::NodeRef;
use crate::tree::Tree;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo {
            delete,
            no_compress,
            termtree,
            debug_messages,
        }) => {
            let mut settings = Settings::load(cli.config_file.as_deref())?;
            settings.debug_messages |= *debug_messages;
            let out = run_demo(&settings, delete, !*no_compress, *termtree)?;
            output::info(&out);
            Ok(())
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => config_show(cli.config_file.as_deref()),
            ConfigCommands::Path => config_path(),
        },
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Sample tree used by `demo`:
///
/// ```text
/// A
/// |
/// |_ B
/// |  |
/// |  |_ E
/// |
/// |_ C
/// |
/// |_ D
/// ```
pub fn build_demo_tree(
    settings: &Settings,
) -> TreeResult<(Tree<String>, BTreeMap<String, NodeRef<String>>)> {
    let mut tree = Tree::with_settings(settings);
    let mut handles = BTreeMap::new();

    let a = tree.create_root("A".to_string())?;
    let b = a.add_child("B".to_string())?;
    let c = a.add_child("C".to_string())?;
    let d = a.add_child("D".to_string())?;
    let e = b.add_child("E".to_string())?;
    for (label, node) in [("A", a), ("B", b), ("C", c), ("D", d), ("E", e)] {
        handles.insert(label.to_string(), node);
    }

    Ok((tree, handles))
}

#[instrument(skip(settings))]
pub fn run_demo(
    settings: &Settings,
    delete: &[String],
    compress: bool,
    termtree: bool,
) -> CliResult<String> {
    let (mut tree, handles) = build_demo_tree(settings)?;

    for label in delete {
        let node = handles
            .get(label)
            .ok_or_else(|| CliError::InvalidArgs(format!("unknown node label: {}", label)))?;
        debug!("Deleting subtree at {}", label);
        tree.delete_subtree(node)?;
    }
    if compress {
        tree.compress()?;
    }

    if termtree {
        Ok(tree.to_tree_string().to_string())
    } else {
        Ok(tree.to_string())
    }
}

fn config_show(config_file: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(config_file)?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(&format!("{}\n", path.display())),
        None => output::warning("no config directory available on this platform"),
    }
    Ok(())
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
