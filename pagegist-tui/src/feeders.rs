use crate::shutdown::ShutdownHandle;
use crate::tui::TuiMsg;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::{self, sync::mpsc, time};

/// Spawn the two producer tasks behind the UI: a dedicated blocking thread
/// polling for terminal events and the spinner/redraw tick. Both stop on
/// the shutdown signal.
pub fn spawn_tui_feeders(tui: mpsc::Sender<TuiMsg>, shutdown: ShutdownHandle) {
    // The reader polls with a timeout instead of parking in `event::read`,
    // so runtime teardown never waits on one last keypress.
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    let mut shutdown_input = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = shutdown_input.recv().await;
        stop_flag.store(true, Ordering::Relaxed);
    });

    let tui_in = tui.clone();
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match crossterm::event::poll(Duration::from_millis(100)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(e) => {
                        if tui_in.blocking_send(TuiMsg::InputEvent(e)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tui_in.blocking_send(TuiMsg::OpError(format!("input: {e}")));
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    let _ = tui_in.blocking_send(TuiMsg::OpError(format!("input: {e}")));
                    break;
                }
            }
        }
    });

    let tui_tick = tui;
    let mut shutdown_tick = shutdown.subscribe();
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_millis(80));
        loop {
            tokio::select! {
                _ = shutdown_tick.recv() => break,
                _ = interval.tick() => {
                    let _ = tui_tick.try_send(TuiMsg::Tick);
                }
            }
        }
    });
}
