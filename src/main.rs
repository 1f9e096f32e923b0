// MNIST Digit Drawer.
// • Draw a digit with the mouse on the black 280×280 canvas.
// • Pick its label (0-9) and save: the canvas is captured as 28×28 grayscale.
// • Export writes every saved sample as one MNIST-style CSV row.
// • With --replay the same session runs headless from a JSON-lines event script.

use anyhow::Context;
use clap::Parser;
use log::info;
use mnist_drawer::canvas::Canvas;
use mnist_drawer::config::Args;
use mnist_drawer::session::Session;
use mnist_drawer::types::Label;
use mnist_drawer::{app, replay};

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    info!("Starting mnist-drawer: {args:?}");

    let label = Label::new(args.label)?;
    let mut session = Session::new(Canvas::with_radius(args.brush_radius), label, args.resample);

    match &args.replay {
        Some(script) => {
            let summary = replay::run_file(script, &mut session, &args.out_dir)
                .with_context(|| format!("Replay of {} failed", script.display()))?;
            for path in &summary.exported {
                println!("{}", path.display());
            }
        }
        None => {
            app::run(&mut session, &args.out_dir, args.window_scale())
                .context("Drawing window failed")?;
        }
    }

    Ok(())
}
