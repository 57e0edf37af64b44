use std::sync::atomic::Ordering;
use std::time::Duration;

use metamates::config::read_app_config;
use metamates::page::PageModel;
use metamates::simulation::ActivitySimulator;
use metamates::ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Loading configuration...");
    let app_config = read_app_config();

    let page = PageModel::standard();
    let simulator = ActivitySimulator::new(page.avatar_pods.len(), &app_config);
    simulator.start();
    println!("Activity simulator running");

    let activity = simulator.get_activity();
    let running = simulator.get_running();

    // Once the UI clears the running flag, let the simulator tasks see
    // it and then leave the process.
    let running_for_shutdown = running.clone();
    tokio::spawn(async move {
        let mut check_interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            check_interval.tick().await;
            if !running_for_shutdown.load(Ordering::Relaxed) {
                println!("Running flag is now false, starting graceful shutdown...");
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        std::process::exit(0);
    });

    // Run the UI on the main thread; it reads the activity snapshot
    ui::run_with_activity(activity, running, app_config);

    simulator.stop();
    println!("MetaMates closed");
    Ok(())
}
