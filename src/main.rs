use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use showreel::carousel::HeroCarousel;
use showreel::catalog::Catalog;
use showreel::config::{Settings, load_settings};
use showreel::presenter::Presenter;
use showreel::script::ScriptedInput;
use showreel::simulate;
use showreel::story::StoryViewer;

#[derive(Parser, Debug)]
#[command(name = "showreel", about = "Timed hero carousel and story viewer")]
struct Cli {
    /// Settings file; defaults apply when it does not exist
    #[arg(long, default_value = "showreel.toml")]
    config: PathBuf,

    /// TOML catalog of slides and stories
    #[arg(long, conflicts_with = "images")]
    catalog: Option<PathBuf>,

    /// Directory of images to use as both slides and stories
    #[arg(long)]
    images: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play an instance headless against a virtual clock
    Simulate {
        instance: Instance,

        #[arg(long, default_value_t = 20_000)]
        duration_ms: u64,

        #[arg(long, default_value_t = 16)]
        step_ms: u64,

        /// Story to open at time zero
        #[arg(long)]
        start: Option<usize>,

        /// Scripted input, e.g. 1500:next, 2000:swipe=300,200 or 0:open=3
        #[arg(long = "at", value_name = "MS:INPUT")]
        inputs: Vec<ScriptedInput>,
    },

    /// Open an instance in a window
    #[cfg(feature = "viewer")]
    View { instance: Instance },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Instance {
    Carousel,
    Story,
}

fn build(instance: Instance, catalog: Catalog, settings: &Settings) -> anyhow::Result<Box<dyn Presenter>> {
    let presenter: Box<dyn Presenter> = match instance {
        Instance::Carousel => Box::new(
            HeroCarousel::mount(catalog.slides, settings.carousel_config()).context("failed to mount carousel")?,
        ),
        Instance::Story => Box::new(
            StoryViewer::new(catalog.stories, settings.story_config()).context("failed to create story viewer")?,
        ),
    };
    Ok(presenter)
}

fn load_catalog(cli: &Cli, settings: &Settings) -> anyhow::Result<Catalog> {
    if let Some(dir) = &cli.images {
        return Catalog::from_image_dir(dir).with_context(|| format!("failed to load images from '{}'", dir.display()));
    }
    match cli.catalog.as_ref().or(settings.catalog.as_ref()) {
        Some(path) => Catalog::load(path),
        None => {
            info!("no catalog given, using the demo catalog");
            Ok(Catalog::demo())
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    let catalog = load_catalog(&cli, &settings)?;
    info!(
        slides = catalog.slides.len(),
        stories = catalog.stories.len(),
        "catalog loaded"
    );

    match cli.command {
        Command::Simulate {
            instance,
            duration_ms,
            step_ms,
            start,
            ref inputs,
        } => {
            let mut presenter = build(instance, catalog, &settings)?;
            if let Some(index) = start {
                presenter.open_at(index).context("failed to open start index")?;
            }

            let report = simulate::run(
                presenter.as_mut(),
                inputs,
                Duration::from_millis(duration_ms),
                Duration::from_millis(step_ms),
            )?;
            info!(
                shown = ?report.indices_shown(),
                index = report.last_frame.current_index,
                progress = report.last_frame.progress,
                open = report.last_frame.is_open,
                "simulation finished"
            );
        }
        #[cfg(feature = "viewer")]
        Command::View { instance } => {
            let mut presenter = build(instance, catalog, &settings)?;
            showreel::render::run(presenter.as_mut())?;
        }
    }

    Ok(())
}
