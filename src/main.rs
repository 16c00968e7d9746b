//! Terminal front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use life_sim::{
    config::{CliOverrides, Settings},
    game_of_life::{Pattern, RuleSet},
    utils::{ColorOutput, GridFormatter, TerminalRenderer},
    LifeError, Session,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "life_sim")]
#[command(about = "Interactive Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Grid width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Rule in B/S notation, e.g. B36/S23 (overrides config)
    #[arg(short, long)]
    rule: Option<String>,

    /// Draw cells without outlines
    #[arg(long)]
    no_outline: bool,

    /// Seed pattern placed in the middle of the grid
    #[arg(short, long, conflicts_with = "import")]
    pattern: Option<String>,

    /// File holding exported cell-list text to seed from
    #[arg(short, long)]
    import: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance a seeded grid and print the result
    Run {
        #[command(flatten)]
        session: SessionArgs,

        /// Generations to advance (defaults to the configured batch size)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Print every intermediate generation
        #[arg(long)]
        show_each: bool,

        /// Print the final cell list as JSON
        #[arg(long)]
        export: bool,
    },

    /// Auto-play a seeded grid in the terminal
    Play {
        #[command(flatten)]
        session: SessionArgs,

        /// Number of timer ticks to play
        #[arg(short, long, default_value_t = 50)]
        ticks: u32,

        /// Delay between ticks in milliseconds (overrides config)
        #[arg(short, long)]
        delay: Option<u64>,
    },

    /// Write a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { session, steps, show_each, export } => run_command(session, steps, show_each, export),
        Commands::Play { session, ticks, delay } => play_command(session, ticks, delay),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(args: &SessionArgs, tick_delay_ms: Option<u64>) -> Result<Settings> {
    let mut settings = if args.config.exists() {
        Settings::from_file(&args.config)
            .with_context(|| format!("Failed to load config from {}", args.config.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Config file {} not found, using defaults", args.config.display()))
        );
        Settings::default()
    };

    let rules = args
        .rule
        .as_deref()
        .map(str::parse::<RuleSet>)
        .transpose()
        .context("Failed to parse --rule")?;

    let cli_overrides = CliOverrides {
        width: args.width,
        height: args.height,
        rules,
        tick_delay_ms,
        batch_steps: None,
        no_outline: args.no_outline,
    };
    settings.merge_with_cli(&cli_overrides);
    settings.validate().context("Configuration validation failed")?;

    Ok(settings)
}

/// Seed the session from a pattern or an import file.
/// A rejected import is reported and leaves the grid empty.
fn seed_session(session: &mut Session, args: &SessionArgs, settings: &Settings) -> Result<()> {
    if let Some(ref name) = args.pattern {
        let pattern: Pattern = name.parse()?;
        let grid = pattern
            .centered(settings.width, settings.height)
            .with_context(|| format!("Pattern {} does not fit a {}x{} grid", pattern, settings.width, settings.height))?;
        session.controller().borrow_mut().load_grid(grid)?;
    } else if let Some(ref path) = args.import {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file: {}", path.display()))?;
        report_import(session.on_import_requested(&text), path);
    }
    Ok(())
}

fn report_import(result: Result<usize, LifeError>, path: &Path) {
    match result {
        Ok(population) => println!(
            "{}",
            ColorOutput::success(&format!("Imported {} cells from {}", population, path.display()))
        ),
        Err(LifeError::Parse(e)) => println!(
            "{}",
            ColorOutput::error(&format!("Import failed, {} is not valid JSON: {}", path.display(), e))
        ),
        Err(e) => println!("{}", ColorOutput::error(&format!("Import failed: {}", e))),
    }
}

fn run_command(args: SessionArgs, steps: Option<usize>, show_each: bool, export: bool) -> Result<()> {
    let settings = load_settings(&args, None)?;
    let outline = settings.outline_enabled;

    let mut session = if show_each {
        let renderer = TerminalRenderer { outline, redraw_in_place: false };
        Session::with_renderer(&settings, renderer)?
    } else {
        Session::new(&settings)?
    };
    seed_session(&mut session, &args, &settings)?;

    let steps = steps.unwrap_or(settings.batch_steps);
    println!(
        "{}",
        ColorOutput::info(&format!(
            "Running {} generation(s) on a {}x{} grid ({})",
            steps,
            settings.width,
            settings.height,
            session.controller().borrow().engine().rules()
        ))
    );

    session.controller().borrow_mut().skip_steps(steps);

    let controller = session.controller();
    let controller = controller.borrow();
    if !show_each {
        print!("{}", GridFormatter::format_frame(controller.grid(), controller.stats(), outline));
    }
    if export {
        println!("{}", controller.on_export_requested()?);
    }

    Ok(())
}

/// Wall time covering `ticks` ticks plus half a tick of slack
fn play_duration(tick_delay: Duration, ticks: u32) -> Result<Duration> {
    tick_delay
        .checked_mul(ticks)
        .and_then(|total| total.checked_add(tick_delay / 2))
        .with_context(|| {
            format!(
                "{} ticks of {} ms exceed the maximum play time",
                ticks,
                tick_delay.as_millis()
            )
        })
}

fn play_command(args: SessionArgs, ticks: u32, delay: Option<u64>) -> Result<()> {
    let settings = load_settings(&args, delay)?;
    let renderer = TerminalRenderer {
        outline: settings.outline_enabled,
        redraw_in_place: true,
    };
    let mut session = Session::with_renderer(&settings, renderer)?;
    seed_session(&mut session, &args, &settings)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let local = tokio::task::LocalSet::new();

    let duration = play_duration(session.tick_delay(), ticks)?;

    local.block_on(&runtime, async {
        session.play();
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        session.stop();
    });

    let stats = session.stats();
    println!(
        "{}",
        ColorOutput::success(&format!("Stopped after {} generation(s)", stats.generation - 1))
    );
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let seeds_dir = directory.join("seeds");
    std::fs::create_dir_all(&seeds_dir)
        .with_context(|| format!("Failed to create directory {}", seeds_dir.display()))?;
    let settings = Settings::default();
    for pattern in Pattern::ALL {
        let grid = pattern.centered(settings.width, settings.height)?;
        let path = seeds_dir.join(format!("{}.json", pattern));
        std::fs::write(&path, life_sim::game_of_life::export_cells(&grid)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    println!("Created example seeds in: {}", seeds_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    Ok(())
}
