mod app;
mod bench;
mod config;
mod logger;
mod plotter;
mod processing;
mod types;
mod utils;

use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use eframe::egui;
use log::{error, info, warn};

use app::BenchApp;
use config::ConfigManager;

const CONFIG_PATH: &str = "benchhub.toml";

fn main() {
    logger::init_logger();
    dotenv().ok();
    info!("Application starting");

    let mut config = if Path::new(CONFIG_PATH).exists() {
        match ConfigManager::load_from_file(CONFIG_PATH) {
            Ok(manager) => {
                info!("configuration loaded from {}", CONFIG_PATH);
                manager
            }
            Err(e) => {
                error!("failed to load {}: {}, using defaults", CONFIG_PATH, e);
                ConfigManager::new()
            }
        }
    } else {
        ConfigManager::new()
    };

    // .env / environment override for the serial port
    if let Ok(port) = env::var("BENCH_PORT") {
        info!("serial port overridden by BENCH_PORT={}", port);
        config.get_config_mut().bench.port = port;
    }

    let channels = config.get_config().channels.clone();
    let (sample_sender, sample_receiver) = bounded(channels.sample_channel_capacity);
    let (command_sender, command_receiver) = bounded(channels.command_channel_capacity);
    let (status_sender, status_receiver) = bounded(channels.status_channel_capacity);
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    let worker_config = config.get_config().bench.clone();
    let worker_shutdown = Arc::clone(&shutdown_signal);
    let worker_handle = thread::spawn(move || {
        bench::run_bench_worker(
            worker_config,
            command_receiver,
            sample_sender,
            status_sender,
            worker_shutdown,
        );
    });

    let window = config.get_config().window.clone();
    let options = eframe::NativeOptions {
        vsync: window.vsync,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_resizable(window.resizable),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(BenchApp::new(
                config,
                sample_receiver,
                status_receiver,
                command_sender,
            )))
        }),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // GUI closed; ask the bench worker to shut down
    info!("GUI closed, signaling bench worker to shutdown");
    shutdown_signal.store(true, Ordering::Relaxed);

    let join_result = thread::spawn(move || worker_handle.join());

    match join_result.join() {
        Ok(Ok(())) => info!("bench worker shut down gracefully"),
        Ok(Err(e)) => error!("bench worker panicked: {:?}", e),
        Err(_) => {
            warn!("failed waiting for the bench worker");
        }
    }
}
