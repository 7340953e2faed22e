use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::{Path, PathBuf};

use wifikeys::collector;
use wifikeys::export;
use wifikeys::ui::{print_footer, print_header, print_network_table, print_section};

fn main() -> Result<()> {
    wifikeys::init_logging();

    let matches = Command::new("wifikeys")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Show all wifi passwords stored on this device.\n\
             For all options below PATH is optional when saving files;\n\
             if no path is specified, files go to the current working directory.\n\n\
             Exported files contain pre-shared keys in clear text.",
        )
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .value_name("PATH")
                .num_args(0..=1)
                .default_missing_value(".")
                .help("Show DNS and visible networks, and save JSON and wpa_supplicant.conf in PATH"),
        )
        .arg(
            Arg::new("current")
                .short('c')
                .long("current")
                .num_args(0..=1)
                .default_missing_value(".")
                .value_name("")
                .help("Show currently visible networks"),
        )
        .arg(
            Arg::new("dns")
                .short('d')
                .long("dns")
                .num_args(0..=1)
                .default_missing_value(".")
                .value_name("")
                .help("Show DNS configuration"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .value_name("PATH")
                .num_args(0..=1)
                .default_missing_value(".")
                .help("Save networks as JSON in PATH"),
        )
        .arg(
            Arg::new("wpasupplicant")
                .short('w')
                .long("wpasupplicant")
                .value_name("PATH")
                .num_args(0..=1)
                .default_missing_value(".")
                .help("Create a wpa_supplicant.conf for all networks in PATH"),
        )
        .get_matches();

    if matches.get_flag("version") {
        println!("wifikeys version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut collector = collector::for_host()?;

    print_header();
    let data = collector.get_passwords()?;
    let connected = collector
        .get_currently_connected_ssids()
        .unwrap_or_default();
    print_network_table(&data, &connected);
    print_footer();

    let all = matches.get_one::<String>("all");

    if matches.contains_id("current") || all.is_some() {
        print_section(
            "Currently Visible Networks",
            &collector.get_visible_networks_text()?,
        );
    }
    if matches.contains_id("dns") || all.is_some() {
        print_section(
            "Current DNS Configuration",
            &collector.get_dns_config_text()?,
        );
    }

    if let Some(dir) = output_dir(&matches, "wpasupplicant", all) {
        let path = dir.join(export::SUPPLICANT_FILE_NAME);
        println!();
        export::save_wpa_supplicant(&path, &data, true, "GB")?;
        println!("wpa_supplicant.conf written to {}", path.display());
    }

    if let Some(dir) = output_dir(&matches, "json", all) {
        let path = dir.join(export::JSON_FILE_NAME);
        println!();
        export::save_json(&path, &data)?;
        println!("JSON saved >> {}", path.display());
    }
    println!();

    Ok(())
}

/// Output directory for a file-producing flag: the flag's own PATH if
/// given, otherwise --all's PATH when --all is active, otherwise none.
fn output_dir(matches: &ArgMatches, flag: &str, all: Option<&String>) -> Option<PathBuf> {
    matches
        .get_one::<String>(flag)
        .or(all)
        .map(|dir| Path::new(dir).to_path_buf())
}
