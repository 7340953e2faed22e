use crate::collector::types::NetworkMap;
use colored::Colorize;

const WIDTH: usize = 92;

/// Static header for the default command line output.
pub fn print_header() {
    let title = format!("WIFI PASSWORDS {}", env!("CARGO_PKG_VERSION"));
    println!("{}", format!("{:^WIDTH$}", title).black().on_white());
    println!("{:^WIDTH$}", "Lists known wifi networks and passwords.");
    println!(
        "{:^WIDTH$}",
        "'>' before SSID denotes the currently connected network."
    );
    println!(
        "{:^WIDTH$}",
        "(M) denotes metered connection. --help to show more options."
    );
    println!("{}", "*".repeat(WIDTH));
    println!(
        "{}",
        format!("{:^33} | {:^13} | {:^40}", "NETWORK", "AUTH", "PASSWORD")
            .black()
            .on_white()
    );
}

/// One row per saved network, marking connected and metered entries.
pub fn print_network_table(data: &NetworkMap, connected_ssids: &[String]) {
    for (ssid, network) in data {
        let marker = if connected_ssids.iter().any(|c| c == ssid) {
            ">"
        } else {
            " "
        };
        let metered = if network.metered {
            "(M)".bright_black().to_string()
        } else {
            String::new()
        };
        println!(
            "{:<1} {:<31} | {:<13} | {:<36} {}",
            marker, ssid, network.auth, network.psk, metered
        );
    }
}

/// Static footer.
pub fn print_footer() {
    println!("\n{}", "*".repeat(WIDTH));
}

/// Banner + body used for the visible-networks and DNS sections.
pub fn print_section(title: &str, body: &str) {
    println!("{}", format!("{:^WIDTH$}", title).black().on_white());
    println!("{}", body);
    println!("{}", "*".repeat(WIDTH));
}
