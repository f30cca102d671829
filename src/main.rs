// Entry point.
// Builds the application context, runs the TUI, and tears everything down.

use std::process::ExitCode;

use postdeck::api::DEFAULT_BASE_URL;
use postdeck::app::App;
use postdeck::context::AppContext;
use postdeck::error::Result;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("postdeck: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let ctx = AppContext::new(DEFAULT_BASE_URL)?;

    let mut terminal = ratatui::init();
    // App holds the store subscription, so it must drop before shutdown.
    let result = App::new(&ctx).run(&mut terminal);
    ratatui::restore();

    ctx.shutdown();
    result
}
