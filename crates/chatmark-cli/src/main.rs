use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chatmark_config::{Config, OutputFormat};
use chatmark_engine::{
    ContentBlock, InlineFormatter, MarkdownParser, StyledRun, has_incomplete_table,
    has_unterminated_code_fence, parse_with, parsing::snapshot,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(version, about = "Inspect how streamed chat Markdown is parsed")]
struct Cli {
    /// Config file to use instead of ~/.config/chatmark/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log parser decisions at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the whole input once and print the block tree
    Parse {
        /// Markdown file, or `-` for stdin
        input: String,

        /// Output format: tree or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also print the inline runs of every text block (tree format only)
        #[arg(long)]
        inline: bool,
    },
    /// Replay the input as a growing stream through the parse cache
    Stream {
        /// Markdown file, or `-` for stdin
        input: String,

        /// Characters added per step
        #[arg(short, long)]
        chunk_size: Option<usize>,
    },
    /// Print the streaming probes for the input
    Probe {
        /// Markdown file, or `-` for stdin
        input: String,
    },
    /// Write a config file holding the defaults
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Command::InitConfig { force } = cli.command {
        let path = init_config(cli.config.as_deref(), force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Parse {
            input,
            format,
            inline,
        } => {
            let content = read_input(&input)?;
            let format = format.unwrap_or(config.output.format);
            print!("{}", render_parse(&content, &config, format, inline)?);
        }
        Command::Stream { input, chunk_size } => {
            let content = read_input(&input)?;
            let chunk_size = chunk_size.unwrap_or(config.stream.chunk_size);
            if chunk_size == 0 {
                bail!("chunk size must be at least 1");
            }
            print!("{}", render_stream(&content, &config, chunk_size));
        }
        Command::Probe { input } => {
            let content = read_input(&input)?;
            println!("{}", probe_line(&content));
        }
        Command::InitConfig { .. } => unreachable!("handled before config is loaded"),
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            log::debug!("Config path: {}", path.display());
            match Config::load_from_path(&path)? {
                Some(config) => Ok(config),
                None => bail!("config file not found: {}", path.display()),
            }
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// Writes the default config to `path`, or to the standard location when no
/// path is given. An existing file is kept unless `force` is set.
fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = match path {
        Some(path) => Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()),
        None => Config::config_path(),
    };
    if target.exists() && !force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            target.display()
        );
    }

    let config = Config::default();
    match path {
        Some(_) => config.save_to_path(&target)?,
        None => config.save()?,
    }
    log::debug!("Wrote default config to {}", target.display());
    Ok(target)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
}

fn render_parse(
    content: &str,
    config: &Config,
    format: OutputFormat,
    inline: bool,
) -> Result<String> {
    let blocks = parse_with(content, false, &config.parse_options());
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&blocks)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Tree if inline => Ok(render_tree_with_inline(&blocks)),
        OutputFormat::Tree => Ok(snapshot::outline(&blocks)),
    }
}

/// Outline of each block, followed by its inline runs when it has text.
fn render_tree_with_inline(blocks: &[ContentBlock]) -> String {
    let formatter: InlineFormatter = InlineFormatter::default();
    let mut out = String::new();
    for block in blocks {
        out.push_str(&snapshot::outline(std::slice::from_ref(block)));
        let texts: Vec<&str> = match block {
            ContentBlock::BulletList { items } => items.iter().map(|i| i.content.as_str()).collect(),
            ContentBlock::NumberedList { items } => {
                items.iter().map(|i| i.content.as_str()).collect()
            }
            other => other.inline_text().into_iter().collect(),
        };
        for text in texts {
            for run in formatter.format(text) {
                out.push_str(&format!("    ~ {}\n", describe_run(&run)));
            }
        }
    }
    out
}

fn describe_run(run: &StyledRun) -> String {
    let style = &run.style;
    let mut flags = vec![];
    if style.bold {
        flags.push("bold".to_string());
    }
    if style.italic {
        flags.push("italic".to_string());
    }
    if style.strikethrough {
        flags.push("strike".to_string());
    }
    if style.code {
        flags.push("code".to_string());
    }
    if let Some(name) = &style.mention {
        flags.push(format!("mention={name}"));
    }
    if let Some(link) = &style.link {
        flags.push(format!("link={link}"));
    }
    if flags.is_empty() {
        format!("{:?}", run.text)
    } else {
        format!("{:?} [{}]", run.text, flags.join(", "))
    }
}

fn probe_line(content: &str) -> String {
    format!(
        "unterminated_fence={} incomplete_table={}",
        has_unterminated_code_fence(content),
        has_incomplete_table(content)
    )
}

/// Byte offsets at which a stream of `chunk_size` characters per step is cut.
/// The last offset is always the full length.
fn prefix_ends(content: &str, chunk_size: usize) -> Vec<usize> {
    let mut ends: Vec<usize> = content
        .char_indices()
        .map(|(i, _)| i)
        .skip(chunk_size)
        .step_by(chunk_size)
        .collect();
    if !content.is_empty() {
        ends.push(content.len());
    }
    ends
}

fn render_stream(content: &str, config: &Config, chunk_size: usize) -> String {
    let parser = MarkdownParser::with_options(config.parse_options());
    log::debug!("Streaming with {:?}", parser.options());
    let mut out = String::new();

    for (step, end) in prefix_ends(content, chunk_size).into_iter().enumerate() {
        let prefix = &content[..end];
        let blocks = parser.parse(prefix, true);
        out.push_str(&format!(
            "step {step:>3} bytes={end:<6} blocks={:<3} {}\n",
            blocks.len(),
            probe_line(prefix)
        ));
    }

    let before = parser.full_parses();
    let blocks = parser.parse(content, true);
    let status = if parser.full_parses() == before {
        "hit"
    } else {
        "miss"
    };
    out.push_str(&format!(
        "resubmit: cache {status} ({} full parses)\n",
        parser.full_parses()
    ));
    out.push_str(&snapshot::outline(&blocks));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn prefix_ends_respect_char_boundaries() {
        assert_eq!(prefix_ends("héllo", 2), vec![3, 5, 6]);
        assert_eq!(prefix_ends("ab", 2), vec![2]);
        assert_eq!(prefix_ends("", 4), Vec::<usize>::new());
    }

    #[test]
    fn stream_ends_with_cache_hit() {
        let out = render_stream("# Hi\n\nthere", &Config::default(), 4);
        assert!(out.contains("resubmit: cache hit (3 full parses)"));
        assert!(out.ends_with("Heading h1 \"Hi\"\nParagraph \"there\"\n"));
    }

    #[test]
    fn probe_line_reports_both_probes() {
        assert_eq!(
            probe_line("```rust\n| a |"),
            "unterminated_fence=true incomplete_table=false"
        );
    }

    #[test]
    fn inline_tree_lists_runs() {
        let out = render_parse("Hi **there**", &Config::default(), OutputFormat::Tree, true)
            .unwrap();
        assert_eq!(
            out,
            "Paragraph \"Hi **there**\"\n    ~ \"Hi \"\n    ~ \"there\" [bold]\n"
        );
    }

    #[test]
    fn init_config_writes_loadable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/config.toml");

        let written = init_config(Some(target.as_path()), false).unwrap();
        assert_eq!(written, target);
        assert_eq!(load_config(Some(&target)).unwrap(), Config::default());
    }

    #[test]
    fn init_config_keeps_existing_file_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("config.toml");
        std::fs::write(&target, "[stream]\nchunk_size = 2\n").unwrap();

        let err = init_config(Some(target.as_path()), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(load_config(Some(&target)).unwrap().stream.chunk_size, 2);

        init_config(Some(target.as_path()), true).unwrap();
        assert_eq!(load_config(Some(&target)).unwrap(), Config::default());
    }

    #[test]
    fn json_output_is_tagged() {
        let out = render_parse("---", &Config::default(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "horizontal_rule");
    }
}
