//! Quick command - generate values without storing them.

use std::path::{Path, PathBuf};

use crate::cli::{output, GeneratorArgs};
use crate::core::export::UpsertOutcome;
use crate::core::quick::{self, BatchConfig, QuickOptions, QuickResult, QuickType};
use crate::error::{ExportError, Result, ValidationError};

/// Parsed `quick` arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Positional type; falls back to `--type`.
    pub kind: Option<String>,
    pub generator: GeneratorArgs,
    pub count: Option<usize>,
    pub to: Option<PathBuf>,
    pub name: Option<String>,
    pub force: bool,
    pub template: Option<String>,
    pub batch: Option<PathBuf>,
}

/// Run a quick generation.
pub fn execute(args: Args) -> Result<()> {
    if let Some(batch) = &args.batch {
        return run_batch(batch, args.to.as_deref(), args.force);
    }

    let opts = options(&args)?;

    if let Some(to) = &args.to {
        let name = args
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or(ValidationError::Empty("--name"))?;
        return write_single(&opts, name, to, args.force);
    }

    let template = args.template.as_deref();
    if opts.count == 1 {
        let result = quick::generate_one(&opts)?;
        output::raw(&quick::format_output(&result, template));
        return Ok(());
    }

    let results = quick::generate_many(&opts)?;
    if template.is_some() {
        for result in &results {
            output::raw(&quick::format_output(result, template));
        }
    } else {
        output::header(&format!("Generated {} {}s:", results.len(), opts.kind));
        for (i, result) in results.iter().enumerate() {
            output::raw(&format!("{}. {}", i + 1, result.value));
        }
    }
    Ok(())
}

fn options(args: &Args) -> Result<QuickOptions> {
    let kind: QuickType = args
        .kind
        .as_deref()
        .or(args.generator.kind.as_deref())
        .unwrap_or_default()
        .parse()?;

    Ok(QuickOptions {
        kind,
        length: args.generator.length,
        format: args.generator.format.as_deref().map(str::parse).transpose()?,
        prefix: args.generator.prefix.clone(),
        bits: args.generator.bits,
        no_symbols: args.generator.no_symbols,
        count: args.count.unwrap_or(1),
    })
}

fn write_single(opts: &QuickOptions, name: String, to: &Path, force: bool) -> Result<()> {
    let mut result = quick::generate_one(opts)?;
    result.name = Some(name.clone());

    let outcomes = quick::write_env(to, std::slice::from_ref(&result), force)?;
    let target = output::path(to.display());

    match outcomes.first() {
        Some(UpsertOutcome::Skipped) => Err(ExportError::KeyExists {
            key: name,
            path: to.to_path_buf(),
        }
        .into()),
        Some(UpsertOutcome::Updated) => {
            output::raw(&format!("Generated: {}", result.value));
            output::success(&format!("Updated {} in {}", name, target));
            Ok(())
        }
        _ => {
            output::raw(&format!("Generated: {}", result.value));
            output::success(&format!("Appended {} to {}", name, target));
            Ok(())
        }
    }
}

fn run_batch(batch: &Path, to: Option<&Path>, force: bool) -> Result<()> {
    let config = BatchConfig::load(batch)?;
    let results = quick::generate_batch(&config)?;
    output::dimmed(&format!("Batch: {}", batch.display()));

    let Some(to) = to else {
        output::header(&format!("Generated {} secrets:", results.len()));
        for result in &results {
            output::list_item(&format!("{}: {}", label(result), result.value));
        }
        return Ok(());
    };

    let outcomes = quick::write_env(to, &results, force)?;
    output::header(&format!(
        "Generated {} secrets for {}:",
        results.len(),
        output::path(to.display())
    ));
    for (result, outcome) in results.iter().zip(&outcomes) {
        match outcome {
            UpsertOutcome::Added => output::change('+', label(result)),
            UpsertOutcome::Updated => output::change('~', label(result)),
            UpsertOutcome::Skipped => {
                output::change('-', &format!("{} (already present)", label(result)))
            }
        }
    }
    Ok(())
}

fn label(result: &QuickResult) -> &str {
    result.name.as_deref().unwrap_or_default()
}
