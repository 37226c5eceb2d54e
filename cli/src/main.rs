use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use iso9660::{DotEntries, DualEndianPolicy, File, Image, OpenOptions, SectorSource, StreamSource};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Walk an ISO9660 image and print every entry
#[derive(Debug, Parser)]
#[command(name = "isodump", version)]
struct Opt {
    /// Path to the ISO image
    image: PathBuf,

    /// Do not print the root directory's self/parent entries
    #[arg(long)]
    hide_root_dots: bool,

    /// Fail on both-endian fields whose halves disagree
    #[arg(long)]
    strict: bool,

    /// Write the file at PATH to stdout instead of listing
    #[arg(long, value_name = "PATH")]
    cat: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let opt = Opt::parse();

    let file = std::fs::File::open(&opt.image)
        .with_context(|| format!("failed to open {}", opt.image.display()))?;

    let policy = if opt.strict {
        DualEndianPolicy::Reject
    } else {
        DualEndianPolicy::Warn
    };
    let options = OpenOptions::new()
        .dot_entries(DotEntries::Include)
        .dual_endian(policy);
    let image = Image::open_with(StreamSource::new(BufReader::new(file)), options)
        .with_context(|| format!("failed to open image {}", opt.image.display()))?;
    debug!(volume_id = image.volume_id(), "image opened");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Some(path) = &opt.cat {
        let entry = image
            .find(path)
            .with_context(|| format!("failed to find {}", path))?;
        io::copy(&mut entry.reader(), &mut out)
            .with_context(|| format!("failed to read {}", path))?;
    } else {
        let mut walker = Walker {
            out: &mut out,
            now: Utc::now(),
            hide_root_dots: opt.hide_root_dots,
            parents: Vec::new(),
        };
        walker.print_entries(&image.root_dir())?;
    }

    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

struct Walker<'a, W: Write> {
    out: &'a mut W,
    now: DateTime<Utc>,
    hide_root_dots: bool,
    parents: Vec<String>,
}

impl<W: Write> Walker<'_, W> {
    fn print_entries<S: SectorSource>(&mut self, file: &File<S>) -> Result<()> {
        let is_dot = file.is_self() || file.is_parent();
        let depth = self.parents.len();
        if is_dot && (depth > 1 || (depth == 1 && self.hide_root_dots)) {
            return Ok(());
        }

        self.print_entry(file)?;

        // the root is itself a self entry; nested dots are never descended into
        if !file.is_dir() || (is_dot && depth > 0) {
            return Ok(());
        }

        let children = file.children().with_context(|| {
            format!("getting children for {}", display_path(&self.parents, file.name()))
        })?;

        self.parents.push(file.name().to_string());
        for child in &children {
            self.print_entries(child)?;
        }
        self.parents.pop();
        Ok(())
    }

    fn print_entry<S: SectorSource>(&mut self, file: &File<S>) -> Result<()> {
        writeln!(
            self.out,
            "{:?} age: {} bytes: {}, me: {}",
            display_path(&self.parents, file.name()),
            format_age((self.now - file.mod_time()).num_seconds()),
            file.size(),
            file.has_multi_extent()
        )
        .context("failed to write listing")
    }
}

/// Join path components, rendering the self/parent markers as `.` and `..`
fn display_path(parents: &[String], name: &str) -> String {
    let mut components: Vec<&str> = parents.iter().map(String::as_str).collect();
    components.push(name);
    components
        .join("/")
        .replace('\u{0}', ".")
        .replace('\u{1}', "..")
}

/// Whole-second duration in `1h2m3s` form
fn format_age(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let (hours, minutes, secs) = (total / 3600, total / 60 % 60, total % 60);
    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}
