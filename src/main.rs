mod cli;
mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use projectile_playground::compute::{draw_list, init_state, tick};
use projectile_playground::entities::SimState;
use projectile_playground::input::InputQueue;

use crate::cli::Cli;

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        builder.filter_level(level);
    }
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Runs until the user asks to exit.
///
/// Input model: the reader thread forwards every terminal event; at the top
/// of each frame all of them are mapped into the `InputQueue` and applied in
/// order, so a press is seen exactly once and never mid-update.
fn sim_loop<W: Write>(
    out: &mut W,
    state: &mut SimState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_budget: Duration,
) -> Result<()> {
    let mut queue = InputQueue::new();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            queue.push_raw(&ev);
        }
        let (next, exit) = queue.drain_into(state, rng);
        *state = next;
        if exit {
            debug!("exit requested at frame {}", state.frame);
            return Ok(());
        }

        // ── Advance and draw ──────────────────────────────────────────────────
        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;
        *state = tick(state, dt, rng);

        let (width, height) = terminal::size()?;
        display::render(out, state, &draw_list(state), width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_budget = cli.frame_budget();
    info!(
        "starting: seed {:?}, frame budget {:?}, step {:?}",
        cli.seed, frame_budget, cli.step
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot switch terminal to raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for press/repeat/release reporting so held keys don't re-fire.
    // Terminals without the kitty protocol fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut state = init_state(cli.step.into());
    let result = sim_loop(&mut out, &mut state, &rx, &mut rng, frame_budget);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exited after {} frames", state.frame);
    result
}
