use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use ueconfig::{
    decode_settings, encode_settings, parse_document, read_text, serialize_document, write_text,
    AntiAliasingMethod, EngineSettings, GraphicsRhi, Line,
};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "ueconfig")]
#[command(about = "Lossless editor for Unreal-style INI configuration files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the known renderer settings found in a config file as JSON
    Get {
        /// Config file to read (e.g. Config/DefaultEngine.ini)
        file: PathBuf,
    },

    /// Update known renderer settings in place, preserving everything else
    Set {
        /// Config file to edit
        file: PathBuf,

        /// r.RayTracing (true/false)
        #[arg(long)]
        ray_tracing: Option<bool>,

        /// r.Lumen.DiffuseIndirect.Allow (true/false)
        #[arg(long)]
        lumen: Option<bool>,

        /// r.Nanite (true/false)
        #[arg(long)]
        nanite: Option<bool>,

        /// r.Shadow.Virtual.Enable (true/false)
        #[arg(long)]
        virtual_shadow_maps: Option<bool>,

        /// r.AntiAliasingMethod (0, 1, 2, or 4)
        #[arg(long)]
        anti_aliasing: Option<u8>,

        /// r.VSync (true/false)
        #[arg(long)]
        vsync: Option<bool>,

        /// DefaultGraphicsRHI (dx11, dx12, or vulkan)
        #[arg(long)]
        rhi: Option<String>,

        /// Dry run - show what would change without modifying the file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Rewrite a config file in canonical form via the structured model
    Normalize {
        /// Config file to normalize
        file: PathBuf,

        /// Dry run - show what would change without modifying the file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// List the sections of a config file with line counts
    Sections {
        /// Config file to inspect
        file: PathBuf,
    },

    /// Scan a directory for .ini files and report known settings
    Scan {
        /// Directory to scan (e.g. a project's Config/ directory)
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get { file } => cmd_get(&file),

        Commands::Set {
            file,
            ray_tracing,
            lumen,
            nanite,
            virtual_shadow_maps,
            anti_aliasing,
            vsync,
            rhi,
            dry_run,
            diff,
        } => {
            let settings = build_settings(
                ray_tracing,
                lumen,
                nanite,
                virtual_shadow_maps,
                anti_aliasing,
                vsync,
                rhi.as_deref(),
            )?;
            cmd_set(&file, &settings, dry_run, diff)
        }

        Commands::Normalize {
            file,
            dry_run,
            diff,
        } => cmd_normalize(&file, dry_run, diff),

        Commands::Sections { file } => cmd_sections(&file),

        Commands::Scan { dir } => cmd_scan(&dir),
    }
}

fn build_settings(
    ray_tracing: Option<bool>,
    lumen: Option<bool>,
    nanite: Option<bool>,
    virtual_shadow_maps: Option<bool>,
    anti_aliasing: Option<u8>,
    vsync: Option<bool>,
    rhi: Option<&str>,
) -> Result<EngineSettings> {
    let anti_aliasing = match anti_aliasing {
        Some(raw) => Some(AntiAliasingMethod::from_raw(raw).with_context(|| {
            format!("invalid --anti-aliasing value {raw}, expected 0, 1, 2, or 4")
        })?),
        None => None,
    };

    let rhi = match rhi {
        Some(name) => Some(parse_rhi(name)?),
        None => None,
    };

    Ok(EngineSettings {
        ray_tracing,
        lumen,
        nanite,
        virtual_shadow_maps,
        anti_aliasing,
        vsync,
        rhi,
    })
}

fn parse_rhi(name: &str) -> Result<GraphicsRhi> {
    match name.to_ascii_lowercase().as_str() {
        "dx11" => Ok(GraphicsRhi::Dx11),
        "dx12" => Ok(GraphicsRhi::Dx12),
        "vulkan" => Ok(GraphicsRhi::Vulkan),
        other => anyhow::bail!("invalid --rhi value '{other}', expected dx11, dx12, or vulkan"),
    }
}

fn cmd_get(file: &Path) -> Result<()> {
    let text = read_text(file).with_context(|| format!("failed to read {}", file.display()))?;
    let settings = decode_settings(&text);
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn cmd_set(file: &Path, settings: &EngineSettings, dry_run: bool, show_diff: bool) -> Result<()> {
    if settings.is_empty() {
        anyhow::bail!("no settings given; pass at least one --flag (see ueconfig set --help)");
    }

    let original =
        read_text(file).with_context(|| format!("failed to read {}", file.display()))?;
    let modified = encode_settings(&original, settings);

    finish_rewrite(file, &original, &modified, dry_run, show_diff)
}

fn cmd_normalize(file: &Path, dry_run: bool, show_diff: bool) -> Result<()> {
    let original =
        read_text(file).with_context(|| format!("failed to read {}", file.display()))?;
    let modified = serialize_document(&parse_document(&original));

    finish_rewrite(file, &original, &modified, dry_run, show_diff)
}

fn finish_rewrite(
    file: &Path,
    original: &str,
    modified: &str,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    if original == modified {
        println!("{} {}", "unchanged".dimmed(), file.display());
        return Ok(());
    }

    if show_diff {
        display_diff(file, original, modified);
    }

    if dry_run {
        println!("{} {}", "would update".yellow(), file.display());
        return Ok(());
    }

    write_text(file, modified)
        .with_context(|| format!("failed to write {}", file.display()))?;
    println!("{} {}", "updated".green(), file.display());
    Ok(())
}

/// Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (updated)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}

fn cmd_sections(file: &Path) -> Result<()> {
    let text = read_text(file).with_context(|| format!("failed to read {}", file.display()))?;
    let doc = parse_document(&text);

    for section in &doc.sections {
        let name = if section.name.is_empty() {
            "(before first header)".dimmed().to_string()
        } else {
            section.name.bold().to_string()
        };
        let properties = section.lines.iter().filter(|l| l.is_property()).count();
        let comments = section.lines.iter().filter(|l| l.is_comment()).count();
        println!("{name}  {properties} properties, {comments} comments");
        for line in &section.lines {
            if let Line::Property { key, value, .. } = line {
                println!("  {key}={value}");
            }
        }
    }
    Ok(())
}

fn cmd_scan(dir: &Path) -> Result<()> {
    let mut found = 0usize;

    for entry in WalkDir::new(dir).max_depth(2) {
        let entry = entry?;
        if !entry.file_type().is_file()
            || entry.path().extension().and_then(|s| s.to_str()) != Some("ini")
        {
            continue;
        }
        found += 1;

        let Ok(text) = read_text(entry.path()) else {
            println!("{} {}", "unreadable".red(), entry.path().display());
            continue;
        };
        let settings = decode_settings(&text);
        if settings.is_empty() {
            println!("{} {}", "no known settings".dimmed(), entry.path().display());
        } else {
            println!(
                "{} {}  {}",
                "settings".green(),
                entry.path().display(),
                serde_json::to_string(&settings)?
            );
        }
    }

    if found == 0 {
        anyhow::bail!("no .ini files found under {}", dir.display());
    }
    Ok(())
}
