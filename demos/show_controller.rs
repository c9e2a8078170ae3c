extern crate arubars;

use arubars::driver::{
    Controller,
    ShowCommand,
};
use env_logger::{
    Builder,
    Target,
};
use log::LevelFilter;
use std::env;

// obviously set these to whatever you want to test with!
const ENABLE_LOGGING: bool = true;
const DEFAULT_CONFIG_FILE: &str = "demos/aruba_controller.yaml";

/// Enable (or not) some logging for our example.
fn enable_logging() {
    if !ENABLE_LOGGING {
        return;
    }

    let mut builder = Builder::from_default_env();

    builder.target(Target::Stdout);
    builder.filter_level(LevelFilter::Info);

    builder.init();
}

/// Connect to the controller described by the config file given as the first argument, then dump
/// the AP database and port status. A second argument is taken as a virtual AP name to show.
fn main() {
    enable_logging();

    let mut args = env::args().skip(1);

    let config_file = args
        .next()
        .unwrap_or_else(|| String::from(DEFAULT_CONFIG_FILE));

    let mut controller =
        Controller::from_config_file(&config_file).expect("failed connecting to controller");

    println!(
        "controller software version: {}",
        controller.software_version().unwrap_or("unknown")
    );

    let mut commands = vec![ShowCommand::ApDatabase, ShowCommand::PortStatus];

    if let Some(virtual_ap) = args.next() {
        commands.push(ShowCommand::WlanVirtualAp(virtual_ap));
    }

    for command in &commands {
        let output = controller.show(command).expect("failed running show command");

        println!("{command}:\n{output}\n");
    }

    controller.close().expect("failed closing controller");
}
