use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{Cell, Table};
use serde::Serialize;

use domo::{Column, Schema, SchemaDiff, SchemaSource};

use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::loader::{FileSchemaSource, load_schema_file};
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, create_table};
use crate::theme::{GLYPHS, drift_color, mismatch_color};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Inspect",
        commands: &[
            "domo schema show .domo/schemas/sales.json       # Print a schema file",
            "domo --output json schema show export.json      # Same, as JSON",
        ],
    },
    ExampleGroup {
        title: "Drift",
        commands: &[
            "domo schema diff sales                           # Snapshot vs remote export",
            "domo schema diff sales --remote export.json      # Compare against a specific export",
            "domo -q schema check sales                       # Exit code only",
        ],
    },
];

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// Print the columns of a schema file
    #[command(name = "show")]
    Show {
        /// Schema file, either {"columns": [...]} or a dataset body
        file: PathBuf,
    },

    /// Explain how a local snapshot differs from the remote dataset schema
    #[command(name = "diff")]
    Diff {
        /// Dataset id
        dataset: String,

        /// Local schema file (defaults to <schemas_dir>/<dataset>.json)
        #[arg(long)]
        local: Option<PathBuf>,

        /// Remote schema file (defaults to <remote_dir>/<dataset>.json)
        #[arg(long)]
        remote: Option<PathBuf>,
    },

    /// Report only whether the dataset schema changed
    #[command(name = "check")]
    Check {
        /// Dataset id
        dataset: String,

        /// Local schema file (defaults to <schemas_dir>/<dataset>.json)
        #[arg(long)]
        local: Option<PathBuf>,

        /// Remote schema file (defaults to <remote_dir>/<dataset>.json)
        #[arg(long)]
        remote: Option<PathBuf>,
    },
}

/// Returns `true` when a dataset differs from its snapshot.
pub async fn handle_schema_commands(command: SchemaCommands, output: &OutputManager) -> Result<bool> {
    match command {
        SchemaCommands::Show { file } => {
            handle_show(&file, output)?;
            Ok(false)
        }
        SchemaCommands::Diff {
            dataset,
            local,
            remote,
        } => {
            let ctx = find_context(output, local.is_some() && remote.is_some())?;
            handle_diff(&ctx, &dataset, local.as_deref(), remote.as_deref(), output).await
        }
        SchemaCommands::Check {
            dataset,
            local,
            remote,
        } => {
            let ctx = find_context(output, local.is_some() && remote.is_some())?;
            handle_check(&ctx, &dataset, local.as_deref(), remote.as_deref(), output).await
        }
    }
}

fn find_context(output: &OutputManager, explicit_paths: bool) -> Result<ProjectContext> {
    let ctx = ProjectContext::find()?;
    if !ctx.is_initialized() && !explicit_paths {
        output.error("domo is not initialized in this project.");
        output.info("Run 'domo init' first, or pass both --local and --remote.");
        anyhow::bail!("Project not initialized");
    }
    output.verbose(&format!("Project root: {}", ctx.project_root.display()));
    Ok(ctx)
}

fn handle_show(file: &Path, output: &OutputManager) -> Result<()> {
    let schema = load_schema_file(file)?;
    output.heading(&format!("{} {}", GLYPHS.file, file.display()));
    output.display(&SchemaView {
        source: file.display().to_string(),
        columns: schema.columns,
    })
}

async fn handle_diff(
    ctx: &ProjectContext,
    dataset: &str,
    local: Option<&Path>,
    remote: Option<&Path>,
    output: &OutputManager,
) -> Result<bool> {
    let (local_schema, remote_schema) = load_pair(ctx, dataset, local, remote, output).await?;
    let diff = domo::diff(&local_schema, &remote_schema);

    output.heading(&format!("Schema Diff: {dataset}"));
    if diff.is_empty() {
        if output.is_json() {
            output.display(&DiffReport::new(dataset, &diff))?;
        } else {
            output.success("Local snapshot matches the remote schema");
        }
        return Ok(false);
    }

    output.display(&DiffReport::new(dataset, &diff))?;
    if diff.only_column_name_changes() && !output.is_json() {
        output.info("Only column names differ; data in place is unaffected.");
    }
    Ok(true)
}

async fn handle_check(
    ctx: &ProjectContext,
    dataset: &str,
    local: Option<&Path>,
    remote: Option<&Path>,
    output: &OutputManager,
) -> Result<bool> {
    let (local_schema, remote_schema) = load_pair(ctx, dataset, local, remote, output).await?;
    let changed = domo::has_schema_changed(&local_schema, &remote_schema);

    output.display(&CheckReport {
        dataset: dataset.to_string(),
        changed,
    })?;
    Ok(changed)
}

/// Local snapshot and remote export of `dataset`, in that order.
async fn load_pair(
    ctx: &ProjectContext,
    dataset: &str,
    local: Option<&Path>,
    remote: Option<&Path>,
    output: &OutputManager,
) -> Result<(Schema, Schema)> {
    let local_path = local.map_or_else(|| ctx.local_schema_path(dataset), Path::to_path_buf);
    output.verbose(&format!("Local schema: {}", local_path.display()));
    let local_schema = load_schema_file(&local_path)?;

    let mut source = FileSchemaSource::new(&ctx.remote_dir);
    if let Some(remote) = remote {
        source = source.with_file(dataset, remote);
    }
    output.verbose(&format!("Remote schema: {}", source.path_for(dataset).display()));
    let remote_schema = source
        .dataset_schema(dataset)
        .await
        .with_context(|| format!("Failed to read remote schema of {dataset}"))?;

    log::debug!(
        "dataset {dataset}: {} local vs {} remote columns",
        local_schema.len(),
        remote_schema.len()
    );
    Ok((local_schema, remote_schema))
}

#[derive(Serialize)]
struct SchemaView {
    source: String,
    columns: Vec<Column>,
}

impl TableDisplay for SchemaView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = create_table(options);
        add_table_header(options, &mut table, &["#", "Name", "Type"]);
        for (index, column) in self.columns.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(&column.name),
                Cell::new(column.column_type),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("{}:{}", c.name, c.column_type))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Serialize)]
struct DiffReport<'a> {
    dataset: &'a str,
    differences: usize,
    diff: &'a SchemaDiff,
}

impl<'a> DiffReport<'a> {
    fn new(dataset: &'a str, diff: &'a SchemaDiff) -> Self {
        Self {
            dataset,
            differences: diff.diffs_count(),
            diff,
        }
    }
}

impl TableDisplay for DiffReport<'_> {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = create_table(options);
        add_table_header(options, &mut table, &["Change", "Index", "Remote", "Local", "Detail"]);
        for (kind, mismatch) in self.diff.iter() {
            let mut change = Cell::new(kind);
            if !options.no_color {
                change = change.fg(mismatch_color(kind));
            }
            table.add_row(vec![
                change,
                Cell::new(opt(mismatch.remote_column_index)),
                Cell::new(column_label(mismatch.remote_column_name.as_deref(), mismatch.remote_column_type)),
                Cell::new(column_label(mismatch.compared_column_name.as_deref(), mismatch.compared_column_type)),
                Cell::new(&mismatch.message),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        let mut parts = Vec::new();
        for (label, count) in [
            ("~name", self.diff.name_mismatches.len()),
            ("~type", self.diff.type_mismatches.len()),
            ("-", self.diff.columns_to_delete.len()),
            ("+", self.diff.columns_to_add.len()),
        ] {
            if count > 0 {
                parts.push(format!("{count}{label}"));
            }
        }
        format!("{}: {} differences {}", self.dataset, self.differences, parts.join(" "))
    }
}

#[derive(Serialize)]
struct CheckReport {
    dataset: String,
    changed: bool,
}

impl CheckReport {
    fn status(&self) -> &'static str {
        if self.changed { "changed" } else { "unchanged" }
    }
}

impl TableDisplay for CheckReport {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = create_table(options);
        add_table_header(options, &mut table, &["Dataset", "Status"]);
        let mut status = Cell::new(self.status());
        if !options.no_color {
            status = status.fg(drift_color(self.changed));
        }
        table.add_row(vec![Cell::new(&self.dataset), status]);
        table
    }

    fn to_compact(&self) -> String {
        format!("{} {}", self.dataset, self.status())
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn column_label(name: Option<&str>, column_type: Option<domo::ColumnType>) -> String {
    match (name, column_type) {
        (Some(name), Some(ty)) => format!("{name} ({ty})"),
        (Some(name), None) => name.to_string(),
        _ => String::new(),
    }
}
