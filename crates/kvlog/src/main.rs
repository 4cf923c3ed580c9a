use clap::Parser;
use kvlog::store::{BatchStore, StoreBackend, StoreLimits, SyncMode};
use kvlog::{ConfigLoader, LogRecord, RecordWriter, TimeZoneSetting, WriteSummary, WriterConfig};
use std::io::{BufRead, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Records buffered from the input before each write call, before rounding
/// up to whole batches.
const READ_CHUNK: usize = 1000;

/// Rounds [`READ_CHUNK`] up to a multiple of the batch size so that only the
/// final write of the stream can produce a short batch.
fn read_chunk_len(max_batch_items: NonZeroUsize) -> usize {
    READ_CHUNK.div_ceil(max_batch_items.get()) * max_batch_items.get()
}

#[derive(Parser, Debug)]
#[command(
    name = "kvlog",
    version,
    about = "Write newline-delimited JSON log records to a key-value store"
)]
struct Cli {
    /// Input file with one JSON record per line; reads stdin when omitted
    input: Option<PathBuf>,

    /// Writer config file (JSON or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Destination domain; required unless set in the config file
    #[arg(long)]
    domain: Option<String>,

    /// Zone for the `time` attribute: local, UTC, +HH:MM or an IANA name
    #[arg(long)]
    time_zone: Option<TimeZoneSetting>,

    /// Items per batch write
    #[arg(long)]
    batch_size: Option<NonZeroUsize>,

    /// Byte budget per attribute value
    #[arg(long)]
    max_attribute_bytes: Option<usize>,

    /// Append to `<DATA_DIR>/<domain>.jsonl`; without it batches are printed to stdout
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// fsync after every batch (file store only)
    #[arg(long, default_value_t = false)]
    sync: bool,
}

fn resolve_config(cli: &Cli) -> Result<WriterConfig, Box<dyn std::error::Error>> {
    let mut config = match (&cli.config, &cli.domain) {
        (Some(path), _) => ConfigLoader::from_path(path)?,
        (None, Some(domain)) => WriterConfig::new(domain.clone()),
        (None, None) => return Err("either --config or --domain is required".into()),
    };
    if let Some(domain) = &cli.domain {
        config.domain = domain.clone();
    }
    if let Some(time_zone) = cli.time_zone {
        config.time_zone = time_zone;
    }
    if let Some(batch_size) = cli.batch_size {
        config.max_batch_items = batch_size;
    }
    if let Some(max_bytes) = cli.max_attribute_bytes {
        config.max_attribute_bytes = max_bytes;
    }
    config.validate()?;
    Ok(config)
}

fn write_chunk(
    writer: &RecordWriter,
    chunk: &mut Vec<LogRecord>,
    total: &mut WriteSummary,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = writer.write(chunk)?;
    total.records += summary.records;
    total.batches += summary.batches;
    total.truncated_attributes += summary.truncated_attributes;
    chunk.clear();
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&cli)?;
    let limits = StoreLimits::from(&config);
    let sync_mode = if cli.sync {
        SyncMode::Always
    } else {
        SyncMode::None
    };

    let backend = Arc::new(match &cli.data_dir {
        Some(dir) => StoreBackend::new_file_with_config(dir, sync_mode, limits)?,
        None => StoreBackend::new_memory_with_limits(limits),
    });
    let store: Arc<dyn BatchStore> = backend.clone();
    let chunk_len = read_chunk_len(config.max_batch_items);
    let writer = RecordWriter::new(store, config)?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut total = WriteSummary::default();
    let mut chunk = Vec::with_capacity(chunk_len);
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: LogRecord = serde_json::from_str(&line)
            .map_err(|e| format!("line {}: invalid record: {e}", index + 1))?;
        chunk.push(record);
        if chunk.len() == chunk_len {
            write_chunk(&writer, &mut chunk, &mut total)?;
        }
    }
    if !chunk.is_empty() {
        write_chunk(&writer, &mut chunk, &mut total)?;
    }

    if let Some(memory) = backend.as_memory() {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for call in memory.calls() {
            serde_json::to_writer(&mut out, &call)?;
            writeln!(out)?;
        }
    }

    info!(
        records = total.records,
        batches = total.batches,
        truncated_attributes = total.truncated_attributes,
        domain = %writer.config().domain,
        "write complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    kvlog::telemetry::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
