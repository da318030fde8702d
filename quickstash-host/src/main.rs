use clap::Parser;
use quickstash_core::{
    Container, ContainerId, ContainerRegistry, HighlightScheduler, Outcome, StashReport, StashService,
};
use quickstash_host::{Config, MenuState, StashTrigger, World, hover_text, sinks};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Stash the player's inventory into nearby chests of a simulated world
#[derive(Debug, Parser)]
#[command(name = "quickstash", version)]
struct Args {
    /// World description (YAML)
    #[arg(long)]
    world: PathBuf,

    /// Settings file (TOML); QUICKSTASH_* environment variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Key to press, defaults to the configured hotkey
    #[arg(long)]
    key: Option<String>,

    /// Pretend a menu is open
    #[arg(long)]
    menu_open: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cfg.apply_env()?;
    cfg.stash.validate()?;

    let registry = Arc::new(ContainerRegistry::new());
    let mut world = World::load(&args.world, registry.clone())?;
    tracing::info!(
        player = %world.player.name,
        chests = world.chests().len(),
        registered = registry.len(),
        "world loaded"
    );

    for chest in world.chests() {
        let chest = chest.lock();
        tracing::debug!(hover = %hover_text(&chest.name, &cfg.hotkey), "chest hover text");
    }

    let highlighter = Arc::new(HighlightScheduler::new(
        Arc::new(sinks::LogHighlighter),
        cfg.stash.highlight.duration(),
        Handle::current(),
    ));
    let hud = Arc::new(sinks::MessageHud::default());
    let service = Arc::new(StashService::new(registry.clone(), highlighter.clone(), hud.clone()));

    let menus = Arc::new(MenuState::default());
    menus.set_open(args.menu_open);
    let trigger = StashTrigger::new(service, menus, cfg.hotkey.clone());

    let key = args.key.clone().unwrap_or_else(|| trigger.hotkey().to_string());
    let Some(report) = trigger.on_key(&key, &mut world.player, &cfg.stash) else {
        println!("Nothing stashed: key not bound, feature disabled or interaction blocked.");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &world);
    }

    for message in hud.drain() {
        println!("! {message}");
    }

    // Let the highlight timers run out so their reverts show up in the log
    if highlighter.pending() > 0 {
        tokio::time::sleep(cfg.stash.highlight.duration() + Duration::from_millis(50)).await;
    }

    Ok(())
}

fn print_report(report: &StashReport, world: &World) {
    let names: HashMap<ContainerId, String> = world
        .chests()
        .iter()
        .map(|c| {
            let c = c.lock();
            (c.id(), c.name.clone())
        })
        .collect();

    for d in &report.decisions {
        let what = format!("{} x{}", d.kind, d.count);
        match &d.outcome {
            Outcome::Placed { container, tier } => {
                let name = names.get(container).map(String::as_str).unwrap_or("?");
                println!("{:<8} {what:<20} -> {name} ({tier:?})", d.slot.to_string());
            }
            Outcome::Skipped(reason) => println!("{:<8} {what:<20} skipped ({reason:?})", d.slot.to_string()),
            Outcome::Failed => println!("{:<8} {what:<20} FAILED", d.slot.to_string()),
        }
    }

    println!();
    for chest in world.chests() {
        let chest = chest.lock();
        let contents: Vec<_> = chest.items().map(|i| i.display_text()).collect();
        println!("{} @ {}: {}", chest.name, chest.position, contents.join(", "));
    }

    let kept: Vec<_> = world
        .player
        .inventory
        .iter()
        .map(|(slot, item)| format!("{slot} {}", item.display_text()))
        .collect();
    println!("{} keeps: {}", world.player.name, kept.join(", "));
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    if let Err(e) = color_eyre::install() {
        eprintln!("color-eyre already installed: {e}");
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;

    Ok(())
}
