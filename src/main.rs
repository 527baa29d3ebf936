//! kodoc — generate API documentation from doc-commented class files.
//!
//! - **menu mode** (default): `kodoc classes` prints the package menu
//! - **site mode**: `kodoc classes -o docs/api` writes the menu and one page
//!   per entity
//! - **class mode**: `kodoc classes --class kohana_kodoc` prints one page

use anyhow::{Context, Result};
use clap::Parser;
use kodoc::config::Config;
use kodoc::reflect::SourceReflector;
use kodoc::registry::{self, FileTree, Layout};
use kodoc::render::{self, Renderer};
use kodoc::{entity, menu};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kodoc",
    about = "Generate API documentation from doc-commented class files"
)]
struct Cli {
    /// Directory containing the class files
    #[arg(default_value = "classes")]
    root: PathBuf,

    /// Output directory. If omitted, writes to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Prefix of extension classes hidden from the menu
    #[arg(long, default_value = "kohana")]
    prefix: String,

    /// Route that entity links are built under
    #[arg(long, default_value = "/guide/api")]
    route: String,

    /// Class file extension
    #[arg(long, default_value = "php")]
    extension: String,

    /// Root segment stripped from class names
    #[arg(long, default_value = "classes")]
    segment: String,

    /// Keep comment bodies as written instead of rendering Markdown
    #[arg(long)]
    plain: bool,

    /// Document a single class instead of building the menu
    #[arg(long)]
    class: Option<String>,

    /// List the sorted methods of every class
    #[arg(long, conflicts_with = "class")]
    methods: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            root: self.root.clone(),
            layout: Layout {
                segment: self.segment.clone(),
                extension: self.extension.clone(),
            },
            prefix: self.prefix.clone(),
            route: self.route.clone(),
            plain: self.plain,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    let renderer = render::create_renderer(&cli.format)?;

    if !config.root.is_dir() {
        anyhow::bail!("class directory not found: {}", config.root.display());
    }
    let tree = FileTree::scan(&config.root, &config.layout)
        .with_context(|| format!("failed to list {}", config.root.display()))?;
    let reflector = SourceReflector::new(&tree, &config.layout);
    let classes = registry::collect(&tree, &config.layout);
    debug!(classes = classes.len(), "collected classes");

    let parts = config.collaborators();
    let ctx = parts.context();

    if cli.methods {
        let methods = registry::class_methods(&reflector, &classes, &config.prefix)?;
        for (class, names) in methods {
            println!("{}: {}", class, names.join(", "));
        }
        return Ok(());
    }

    if let Some(ref name) = cli.class {
        let entity = entity::factory(&reflector, name, &ctx)
            .with_context(|| format!("failed to document {}", name))?;
        let page = renderer.render_entity(&entity)?;
        return match cli.output {
            Some(ref dir) => write_page(dir, &entity.name.to_lowercase(), renderer.as_ref(), &page),
            None => {
                print!("{}", page);
                Ok(())
            }
        };
    }

    match cli.output {
        Some(ref dir) => site_mode(&config, &reflector, &classes, &ctx, renderer.as_ref(), dir),
        None => {
            let tree = menu::menu(&reflector, &classes, &config.prefix, &ctx)?;
            print!("{}", renderer.render_menu(&tree)?);
            Ok(())
        }
    }
}

/// Write the menu plus one page per displayed entity into `dir`.
fn site_mode(
    config: &Config,
    reflector: &SourceReflector,
    classes: &std::collections::BTreeMap<String, String>,
    ctx: &kodoc::parser::ParseContext,
    renderer: &dyn Renderer,
    dir: &Path,
) -> Result<()> {
    let mut entities = Vec::new();
    for name in registry::catalogue(classes, &config.prefix) {
        let entity = entity::factory(reflector, &name, ctx)
            .with_context(|| format!("failed to document {}", name))?;
        write_page(dir, &name, renderer, &renderer.render_entity(&entity)?)?;
        entities.push(entity);
    }

    let tree = menu::build(&entities, ctx.resolver);
    write_page(dir, "menu", renderer, &renderer.render_menu(&tree)?)?;
    info!(pages = entities.len(), output = %dir.display(), "documentation written");
    Ok(())
}

fn write_page(dir: &Path, name: &str, renderer: &dyn Renderer, page: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let path = dir.join(format!("{}.{}", name, renderer.file_extension()));
    fs::write(&path, page).with_context(|| format!("failed to write {}", path.display()))
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
