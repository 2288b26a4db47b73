// Category CLI: Inline SVG
//
// Host adapter around the transformation engine: reads one HTML document,
// inlines its SVG references, and writes the result to a file or stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use kodegen_tools_inline_svg::{InlineSvgConfig, RawInlineOptions, transform};

fn cli() -> Command {
    Command::new("kodegen-inline-svg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inline external SVG references into an HTML document")
        .arg(
            Arg::new("input")
                .help("HTML document to transform")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the result here instead of stdout"),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .help("JSON file with options (selectors, attrs, root, decodeEntities, ...)"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Directory that src references are resolved against"),
        )
        .arg(
            Arg::new("selector")
                .long("selector")
                .short('s')
                .help("Selector of elements to inline (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("attrs")
                .long("attrs")
                .help("Pattern of attribute names copied onto the inlined SVG"),
        )
        .arg(
            Arg::new("decode-entities")
                .long("decode-entities")
                .help("Write non-ASCII characters as character references")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("spritesheet")
                .long("spritesheet")
                .help("Consolidate inlined SVGs into one sprite sheet")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("spritesheet-class")
                .long("spritesheet-class")
                .help("CSS class of the generated sprite container"),
        )
}

/// Options file first, then command line flags on top
fn resolve_config(matches: &clap::ArgMatches) -> Result<InlineSvgConfig> {
    let mut builder = InlineSvgConfig::builder();

    if let Some(path) = matches.get_one::<String>("options") {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {path}"))?;
        builder = RawInlineOptions::from_json(&json)?.apply(builder)?;
    }

    if let Some(root) = matches.get_one::<String>("root") {
        builder = builder.root(root);
    }
    if let Some(selectors) = matches.get_many::<String>("selector") {
        builder = builder.selectors(selectors.cloned().collect::<Vec<_>>());
    }
    if let Some(attrs) = matches.get_one::<String>("attrs") {
        builder = builder.attrs(attrs.as_str());
    }
    if matches.get_flag("decode-entities") {
        builder = builder.decode_entities(true);
    }
    if matches.get_flag("spritesheet") {
        builder = builder.create_spritesheet(true);
    }
    if let Some(class) = matches.get_one::<String>("spritesheet-class") {
        builder = builder.spritesheet_class(class);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;

    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .context("input is required")?;
    let html = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let output = transform(&html, &config)
        .with_context(|| format!("Failed to inline SVGs in {}", input.display()))?;

    match matches.get_one::<String>("output") {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write {path}"))?,
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
