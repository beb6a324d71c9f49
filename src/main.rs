//! # Aeon Editor Main Entry Point
//!
//! Headless driver for the editor core: imports a model through the same
//! command path the graphical editor uses, prints a summary and optionally
//! exports the model again.

use aeon_editor::cmd_args::CommandLineArgs;
use aeon_editor::config::{self, EditorConfig};
use aeon_editor::editor::services::{
    BuiltinFormats, ExportOutcome, ImportOutcome, ModelFormat, TerminalDialogs,
};
use aeon_editor::{
    CommandOutcome, EditorCommand, EditorController, GraphView, LiveModel, SimpleEventBus,
    VariablesPanel,
};
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    let config = EditorConfig::load()?;
    tracing::debug!("Editor {} starting with {:?}", config::VERSION, config);

    let mut dialogs = TerminalDialogs::new(cmd_args.yes());
    if let Some(model) = cmd_args.model() {
        dialogs = dialogs.with_input_path(model);
    }
    if let Some(output) = cmd_args.output() {
        dialogs = dialogs.with_output_path(output);
    }

    let model = LiveModel::new(Arc::new(SimpleEventBus::with_debug_mode(
        config.debug_mode,
    )));
    let mut graph = GraphView::attach(&model);
    let mut panel = VariablesPanel::attach(&model);
    let mut controller =
        EditorController::new(model, Arc::new(BuiltinFormats::new()), Arc::new(dialogs));

    if cmd_args.model().is_some() {
        let Some(format) = cmd_args.format() else {
            bail!("Cannot guess the model format, use --format");
        };
        let outcome = controller
            .dispatch(EditorCommand::ImportModel(format))
            .await?;
        if !print_import(&outcome) {
            bail!("Model was not imported");
        }
        println!("{}", panel.render());
        tracing::debug!(
            "Graph view holds {} node(s) and {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );
    }

    if cmd_args.output().is_some() {
        let outcome = controller
            .dispatch(EditorCommand::ExportModel(cmd_args.output_format()))
            .await?;
        if !print_export(&outcome, cmd_args.output_format()) {
            bail!("Model was not exported");
        }
    }

    graph.detach()?;
    panel.detach()?;
    Ok(())
}

/// Print the import summary; returns whether a model was imported
fn print_import(outcome: &CommandOutcome) -> bool {
    match outcome {
        CommandOutcome::Imported(ImportOutcome::Imported(report)) => {
            println!(
                "Imported {} variable(s) and {} regulation(s), layout applied: {}",
                report.variables,
                report.regulations,
                if report.layout_applied { "yes" } else { "no" }
            );
            if !report.warnings.is_empty() {
                println!("{} warning(s) reported", report.warnings.len());
            }
            true
        }
        CommandOutcome::Imported(ImportOutcome::Declined) | CommandOutcome::Skipped => {
            println!("Import cancelled");
            false
        }
        _ => false,
    }
}

/// Print the export summary; returns whether the file was saved
fn print_export(outcome: &CommandOutcome, format: ModelFormat) -> bool {
    match outcome {
        CommandOutcome::Exported(ExportOutcome::Saved { warnings }) => {
            println!(
                "Exported model as {} with {} warning(s)",
                format,
                warnings.len()
            );
            true
        }
        CommandOutcome::Exported(ExportOutcome::Cancelled) => {
            println!("Export cancelled");
            false
        }
        _ => false,
    }
}

fn init_tracing_subscriber(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(config::LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
