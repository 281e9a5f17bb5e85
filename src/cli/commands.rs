use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::store;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{self, Settings};
use crate::domain::error::MutationError;
use crate::domain::DecisionTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    let base_path = cli
        .base
        .clone()
        .unwrap_or_else(|| settings.base_file.clone());

    match &cli.command {
        Some(Commands::Show) => show(&base_path),
        Some(Commands::Check) => check(&base_path),
        Some(Commands::Find { character }) => find(&base_path, character),
        Some(Commands::Compare { first, second }) => compare(&base_path, first, second),
        Some(Commands::Add {
            guessed,
            character,
            feature,
        }) => add(&base_path, guessed, character, feature),
        Some(Commands::Export { output }) => export(&base_path, output.as_deref(), &settings),
        Some(Commands::Config { command }) => config_cmd(command, &settings),
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument]
fn show(base_path: &Path) -> CliResult<()> {
    debug!("base_path: {:?}", base_path);
    let tree = store::load_tree(base_path)?;
    output::header(&format!("base: {}", tree.name()));
    if let Some(root) = tree.arena.root() {
        output::info(&to_termtree(&tree, root, None));
    }
    output::detail(&format!(
        "{} characters, depth {}",
        tree.arena.characters().len(),
        tree.arena.depth()
    ));
    Ok(())
}

#[instrument]
fn check(base_path: &Path) -> CliResult<()> {
    debug!("base_path: {:?}", base_path);
    let tree = store::load_tree(base_path)?;
    tree.validate().map_err(crate::domain::DomainError::from)?;
    output::success(&format!(
        "{}: {} nodes, depth {}",
        tree.name(),
        tree.node_count(),
        tree.arena.depth()
    ));
    Ok(())
}

#[instrument]
fn find(base_path: &Path, character: &str) -> CliResult<()> {
    debug!("base_path: {:?}, character: {:?}", base_path, character);
    let tree = store::load_tree(base_path)?;
    let Some(path) = tree.find_path(character) else {
        output::warning(&format!("no character {character:?} in base"));
        return Ok(());
    };
    let clauses = tree.clauses(&path)?;
    if clauses.is_empty() {
        output::info(&format!("{character} - no features recorded"));
    } else {
        output::info(&format!("{character} - {}", clauses.iter().join(", ")));
    }
    Ok(())
}

#[instrument]
fn compare(base_path: &Path, first: &str, second: &str) -> CliResult<()> {
    debug!("base_path: {:?}", base_path);
    let tree = store::load_tree(base_path)?;
    let Some(first_path) = tree.find_path(first) else {
        output::warning(&format!("no character {first:?} in base"));
        return Ok(());
    };
    let Some(second_path) = tree.find_path(second) else {
        output::warning(&format!("no character {second:?} in base"));
        return Ok(());
    };

    let report = tree.compare(&first_path, &second_path)?;
    if report.shared.is_empty() {
        output::info(&format!("{first} and {second} are not alike"));
    } else {
        output::info(&format!(
            "{first} and {second} are similar in that each is {}",
            report.shared.iter().join(", ")
        ));
    }
    if !report.first_only.is_empty() {
        output::info(&format!(
            "but {first} is {}",
            report.first_only.iter().join(", ")
        ));
    }
    if !report.second_only.is_empty() {
        output::info(&format!(
            "and {second} is {}",
            report.second_only.iter().join(", ")
        ));
    }
    Ok(())
}

#[instrument]
fn add(base_path: &Path, guessed: &str, character: &str, feature: &str) -> CliResult<()> {
    debug!("base_path: {:?}, guessed: {:?}", base_path, guessed);
    let mut tree = store::load_tree(base_path)?;
    let Some(guessed_path) = tree.find_path(guessed) else {
        output::warning(&format!("no character {guessed:?} in base"));
        return Ok(());
    };
    let Some(&leaf) = guessed_path.last() else {
        return Ok(());
    };

    match tree.add_answer(leaf, character, feature) {
        // Not an error at the surface: report the existing path instead of inserting
        Err(MutationError::DuplicateCharacter {
            character,
            path,
        }) => {
            output::warning(&format!(
                "character {character:?} already exists: {}",
                path.iter().map(|v| format!("[{v}]")).join(" -> ")
            ));
            Ok(())
        }
        Err(e) => Err(crate::domain::DomainError::from(e).into()),
        Ok(()) => {
            store::save_tree(&tree, base_path)?;
            output::success(&format!(
                "added {character:?} under feature {feature:?} to {}",
                base_path.display()
            ));
            Ok(())
        }
    }
}

#[instrument]
fn export(base_path: &Path, output_path: Option<&Path>, settings: &Settings) -> CliResult<()> {
    debug!("base_path: {:?}, output: {:?}", base_path, output_path);
    let tree = store::load_tree(base_path)?;
    let dot = tree.export_graph();
    match output_path {
        Some(p) if p.as_os_str() == "-" => {
            output::info(&dot);
            Ok(())
        }
        other => {
            let target = other.unwrap_or(settings.graph_file.as_path());
            store::write_text(target, &dot)?;
            output::success(&format!("wrote graph to {}", target.display()));
            Ok(())
        }
    }
}

fn config_cmd(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml().map_err(crate::cli::error::CliError::App)?);
            Ok(())
        }
        ConfigCommands::Init => {
            let Some(path) = config::global_config_path() else {
                return Err(crate::cli::error::CliError::InvalidArgs(
                    "cannot determine config directory".into(),
                ));
            };
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            store::write_text(&path, &Settings::template())?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => {
                    let marker = if path.exists() { "exists" } else { "missing" };
                    output::info(&format!("{} ({marker})", path.display()));
                }
                None => output::warning("cannot determine config directory"),
            }
            Ok(())
        }
    }
}

fn completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "akin", &mut io::stdout());
}

/// Convert a subtree into a termtree for terminal rendering. Children are
/// prefixed with the answer that selects them.
fn to_termtree(tree: &DecisionTree, idx: Index, answer: Option<&str>) -> termtree::Tree<String> {
    let Some(node) = tree.get_node(idx) else {
        return termtree::Tree::new(String::new());
    };
    let label = match answer {
        Some(prefix) => format!("{prefix}: {}", node.value),
        None => node.value.to_string(),
    };

    let leaves: Vec<_> = [(node.left, "no"), (node.right, "yes")]
        .into_iter()
        .filter_map(|(child, prefix)| child.map(|c| to_termtree(tree, c, Some(prefix))))
        .collect();

    termtree::Tree::new(label).with_leaves(leaves)
}
