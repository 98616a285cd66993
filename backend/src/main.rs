use std::sync::Arc;

use adapters::gemini::GeminiClient;
use anyhow::bail;
use backend::app::App;
use backend::cli::{Cli, Command, WatchKey};
use backend::config::AppConfig;
use backend::desk::PanelState;
use backend::render::{
    analysis_body, blog_body, image_body, render_dashboard, render_panel, render_pools,
    render_signals,
};
use clap::Parser;
use common::logger::init_tracing;
use market::MarketDataStore;
use market::view::PoolSort;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    init_tracing("signal-desk", config.json_logs);

    let ai = Arc::new(GeminiClient::new(config.gemini())?);
    let store = Arc::new(MarketDataStore::start());
    let app = Arc::new(App::new(Arc::clone(&store), ai));

    let result = run(&app, cli.command.unwrap_or(Command::Watch)).await;

    drop(app);
    match Arc::try_unwrap(store) {
        Ok(store) => store.shutdown().await,
        // An analysis task still holds the store; it is aborted on drop.
        Err(_) => debug!("store still shared at exit"),
    }

    result
}

async fn run(app: &Arc<App>, command: Command) -> anyhow::Result<()> {
    let output = match command {
        Command::Watch => return watch(Arc::clone(app)).await,
        Command::AnalyzeCex => {
            print!("{}", render_signals(&app.cex.signals()));
            finished("Signal analysis", app.cex.analyze().await, analysis_body)?
        }
        Command::AnalyzeDex {
            sort,
            direction,
            deep,
        } => {
            app.dex.set_sort(PoolSort::new(sort, direction));
            app.dex.set_deep_mode(deep);
            print!("{}", render_pools(&app.dex.sorted_pools(), app.dex.sort()));
            finished("Pool analysis", app.dex.analyze().await, analysis_body)?
        }
        Command::Blog => finished("Blog", app.blog.fetch_new_post().await, blog_body)?,
        Command::Image {
            prompt,
            aspect_ratio,
        } => {
            let state = app.image.submit(&prompt, aspect_ratio).await?;
            finished("Image", state, image_body)?
        }
    };

    print!("{output}");
    Ok(())
}

/// Renders a finished panel, turning a failure into a non-zero exit.
fn finished<T>(
    title: &str,
    state: PanelState<T>,
    body: impl Fn(&T) -> String,
) -> anyhow::Result<String> {
    if let Some(message) = state.error() {
        bail!("{message}");
    }
    Ok(render_panel(title, &state, body))
}

async fn watch(app: Arc<App>) -> anyhow::Result<()> {
    let mut snapshots = app.store.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (redraw_tx, mut redraw_rx) = mpsc::channel::<()>(16);

    info!("watch mode started");
    draw(&app);

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&app);
            }
            Some(()) = redraw_rx.recv() => draw(&app),
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(key) = WatchKey::parse(&line) else {
                    draw(&app);
                    continue;
                };
                if key == WatchKey::Quit {
                    break;
                }
                handle_key(&app, key, &redraw_tx);
                draw(&app);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("watch mode stopped");
    Ok(())
}

fn handle_key(app: &Arc<App>, key: WatchKey, redraw: &mpsc::Sender<()>) {
    match key {
        WatchKey::TogglePause => {
            app.store.toggle_pause();
        }
        WatchKey::Refresh => {
            app.store.refresh_now();
        }
        WatchKey::Sort(sort_key) => {
            app.dex.select_sort(sort_key);
        }
        WatchKey::ToggleDeepMode => {
            app.dex.toggle_deep_mode();
        }
        WatchKey::AnalyzeSignals => spawn_action(app, redraw, |app| async move {
            app.cex.analyze().await;
        }),
        WatchKey::AnalyzePools => spawn_action(app, redraw, |app| async move {
            app.dex.analyze().await;
        }),
        WatchKey::Blog => spawn_action(app, redraw, |app| async move {
            app.blog.fetch_new_post().await;
        }),
        WatchKey::Quit => {}
    }
}

/// Runs a desk action in the background and asks for a redraw when it ends.
fn spawn_action<F, Fut>(app: &Arc<App>, redraw: &mpsc::Sender<()>, action: F)
where
    F: FnOnce(Arc<App>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let app = Arc::clone(app);
    let redraw = redraw.clone();
    tokio::spawn(async move {
        action(app).await;
        let _ = redraw.send(()).await;
    });
}

fn draw(app: &App) {
    print!("\x1b[2J\x1b[H{}", render_dashboard(app));
}
