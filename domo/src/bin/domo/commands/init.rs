use anyhow::{Context, Result};
use clap::Args;

use crate::context::{DomoConfig, ProjectContext};
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Setup",
    commands: &[
        "domo init                  # Create .domo/config.toml and schema directories",
        "domo init --force          # Rewrite the config with defaults",
    ],
}];

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

pub async fn handle_init(args: InitArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    output.verbose(&format!("Project root: {}", ctx.project_root.display()));

    if ctx.is_initialized() && !args.force {
        output.warning("domo is already initialized in this project.");
        output.info("Use 'domo init --force' to rewrite the config.");
        return Ok(());
    }

    std::fs::create_dir_all(&ctx.domo_dir)
        .with_context(|| format!("Failed to create {}", ctx.domo_dir.display()))?;

    let config = DomoConfig::default();
    let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    std::fs::write(&ctx.config_path, content)
        .with_context(|| format!("Failed to write {}", ctx.config_path.display()))?;

    // Directories as resolved from the config just written.
    let ctx = ProjectContext::from_root(ctx.project_root)?;
    for dir in [&ctx.schemas_dir, &ctx.remote_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    output.success("Initialized domo");
    output.bullet(&format!("Config: {}", ctx.config_path.display()));
    output.bullet(&format!("Local schemas: {}", ctx.schemas_dir.display()));
    output.bullet(&format!("Remote exports: {}", ctx.remote_dir.display()));

    Ok(())
}
