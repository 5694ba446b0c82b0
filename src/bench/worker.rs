use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use log::{error, info, trace, warn};

use super::error::BenchError;
use super::session::BenchSession;
use crate::config::BenchConfig;
use crate::types::{BenchCommand, BenchReading, LinkStatus};

/// Bench worker thread body.
///
/// Owns the serial session for the whole process lifetime: executes
/// commands from the UI, polls the controller while connected and reports
/// readings and link-status events back over the channels.
pub fn run_bench_worker(
    config: BenchConfig,
    command_receiver: Receiver<BenchCommand>,
    sample_sender: Sender<BenchReading>,
    status_sender: Sender<LinkStatus>,
    shutdown_signal: Arc<AtomicBool>,
) {
    let mut session: Option<BenchSession> = None;
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    info!("bench worker thread started");

    while !shutdown_signal.load(Ordering::Relaxed) {
        // While idle, block briefly on the command channel so the shutdown
        // flag stays responsive. While polling, only drain what is pending.
        let command = if session.is_some() {
            match command_receiver.try_recv() {
                Ok(command) => Some(command),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    info!("bench worker: command channel disconnected, exiting");
                    break;
                }
            }
        } else {
            match command_receiver.recv_timeout(Duration::from_millis(100)) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    info!("bench worker: command channel disconnected, exiting");
                    break;
                }
            }
        };

        if let Some(command) = command {
            session = handle_command(command, session, &config, &status_sender);
            continue;
        }

        let Some(active) = session.as_mut() else {
            continue;
        };

        match active.poll() {
            Ok(reading) => {
                trace!("bench worker: frame {:?}", active.last_frame().trim_end());
                match sample_sender.try_send(reading) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        // UI is behind; drop the sample rather than stall the link
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        info!("bench worker: sample channel disconnected, exiting");
                        break;
                    }
                }
                thread::sleep(poll_interval);
            }
            Err(err @ BenchError::MalformedFrame { .. }) => {
                // The bad frame is consumed; the next poll starts clean.
                warn!("bench worker: {}", err);
                report(&status_sender, LinkStatus::Error(err.to_string()));
            }
            Err(err) => {
                error!("bench worker: poll failed: {}", err);
                report(&status_sender, LinkStatus::Error(err.to_string()));
                if let Some(dead) = session.take() {
                    dead.disconnect();
                }
                report(&status_sender, LinkStatus::Disconnected);
            }
        }
    }

    if let Some(active) = session.take() {
        active.disconnect();
        report(&status_sender, LinkStatus::Disconnected);
    }
    info!("bench worker thread exiting gracefully");
}

fn handle_command(
    command: BenchCommand,
    session: Option<BenchSession>,
    config: &BenchConfig,
    status_sender: &Sender<LinkStatus>,
) -> Option<BenchSession> {
    match command {
        BenchCommand::Connect { port } => {
            if session.is_some() {
                warn!("bench worker: already connected, ignoring connect request");
                return session;
            }
            match BenchSession::connect(&port, config) {
                Ok(fresh) => {
                    report(status_sender, LinkStatus::Connected { port });
                    Some(fresh)
                }
                Err(err) => {
                    error!("connection failed: {}", err);
                    report(status_sender, LinkStatus::Error(err.to_string()));
                    None
                }
            }
        }
        BenchCommand::ZeroEncoder => match session {
            Some(mut active) => match active.zero_encoder() {
                Ok(()) => {
                    report(
                        status_sender,
                        LinkStatus::Notice(format!(
                            "Encoder zeroed at {} counts",
                            active.reading().encoder_counts
                        )),
                    );
                    Some(active)
                }
                Err(err @ BenchError::MalformedFrame { .. }) => {
                    warn!("bench worker: zeroing failed: {}", err);
                    report(status_sender, LinkStatus::Error(err.to_string()));
                    Some(active)
                }
                Err(err) => {
                    error!("bench worker: zeroing failed: {}", err);
                    report(status_sender, LinkStatus::Error(err.to_string()));
                    active.disconnect();
                    report(status_sender, LinkStatus::Disconnected);
                    None
                }
            },
            None => {
                warn!("test bench controller is not connected");
                report(
                    status_sender,
                    LinkStatus::Error(BenchError::NotConnected.to_string()),
                );
                None
            }
        },
        BenchCommand::Disconnect => {
            match session {
                Some(active) => {
                    active.disconnect();
                    report(status_sender, LinkStatus::Disconnected);
                }
                None => warn!("test bench controller is not connected"),
            }
            None
        }
    }
}

fn report(status_sender: &Sender<LinkStatus>, status: LinkStatus) {
    if let Err(err) = status_sender.try_send(status) {
        warn!("bench worker: failed to send link status: {}", err);
    }
}
