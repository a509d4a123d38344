use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use ep_cli::logging::redact_value;
use ep_cli::report::ImportSummary;
use ep_crypto::{CryptoConfig, Pbkdf2AesGcm, StaticMasterPassword};
use ep_import::{ImportProgress, LastpassImporter, parse_lastpass_export};
use ep_ingest::looks_like_lastpass;
use ep_model::ImportResult;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, trace, warn};

use crate::cli::{DetectArgs, ImportArgs};

pub fn run_import(args: &ImportArgs) -> Result<ImportSummary> {
    let span = info_span!("import", export = %args.export.display());
    let _guard = span.enter();

    let text = read_export(&args.export)?;
    let config = CryptoConfig::default().with_iterations(args.iterations);
    let master = StaticMasterPassword::new(args.master_password.clone().unwrap_or_default());
    let bar = progress_bar(args.no_progress);
    let progress_bar = bar.clone();
    let encryptor = Pbkdf2AesGcm::new(config);
    debug!(iterations = encryptor.config().iterations, "key derivation settings");
    let importer = LastpassImporter::new(Arc::new(encryptor), Arc::new(master)).with_progress(
        move |progress: ImportProgress| {
            progress_bar.set_length(progress.total as u64);
            progress_bar.set_position(progress.completed as u64);
            if progress.is_done() {
                progress_bar.finish_and_clear();
            }
        },
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let start = Instant::now();
    let outcome = runtime.block_on(parse_lastpass_export(&text, &importer));
    bar.finish_and_clear();

    let result = match outcome {
        Ok(Some(result)) => result,
        Ok(None) => {
            return Err(anyhow!(
                "{} is not a Lastpass CSV export (expected header line \"{}\")",
                args.export.display(),
                ep_ingest::HEADER
            ));
        }
        Err(error) => {
            if let Some(hint) = error.suggestion() {
                eprintln!("hint: {hint}");
            }
            return Err(anyhow::Error::new(error).context("import failed"));
        }
    };
    info!(
        sites = result.sites.len(),
        entries = result.entry_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "import finished"
    );
    if result.is_empty() {
        warn!("export contains no records");
    }
    for (domain, site) in &result.sites {
        trace!(domain = redact_value(domain), entries = site.passwords.len(), "site");
    }

    write_result(&result, args.output.as_deref(), args.compact)?;
    Ok(ImportSummary::from_result(&result))
}

pub fn run_detect(args: &DetectArgs) -> Result<bool> {
    let text = read_export(&args.file)?;
    let recognized = looks_like_lastpass(&text);
    if recognized {
        println!("{}: Lastpass CSV export", args.file.display());
    } else {
        println!("{}: not recognized", args.file.display());
    }
    Ok(recognized)
}

fn read_export(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn progress_bar(disabled: bool) -> ProgressBar {
    if disabled || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{spinner} encrypting {pos}/{len} [{bar:30}] {elapsed}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(0).with_style(style)
}

fn write_result(result: &ImportResult, output: Option<&Path>, compact: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(&mut writer, result, compact)?;
            writer
                .flush()
                .with_context(|| format!("write {}", path.display()))?;
            info!(output = %path.display(), "backup written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, result, compact)?;
            writeln!(writer).context("write stdout")?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, result: &ImportResult, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(writer, result).context("serialize backup")
    } else {
        serde_json::to_writer_pretty(writer, result).context("serialize backup")
    }
}
