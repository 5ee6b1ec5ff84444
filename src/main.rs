// src/main.rs

use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dismpkg::native::{DEFAULT_MAX_STRING_UNITS, ImageBuilder, SystemTime};
use dismpkg::packages::{
    FullyOfflineInstallableType, PackageFeatureState, ReleaseType, RestartType,
};
use dismpkg::{
    Address, CustomProperty, DecodeOptions, Feature, Layout, MemoryImage, PackageInfo,
    PackageRecord, PointerWidth,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "dismpkg")]
#[command(author, version, about = "Decode native image servicing package metadata records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a package record from a raw memory dump
    Inspect {
        /// Path to the dump file
        dump: String,
        /// Address the dump was captured from
        #[arg(short, long, value_parser = parse_address)]
        base: u64,
        /// Address of the package record inside the dump
        #[arg(short, long, value_parser = parse_address)]
        address: u64,
        /// Pointer width of the image that produced the record (32 or 64)
        #[arg(short, long, default_value = "64")]
        pointer_width: PointerWidth,
        /// Longest string accepted, in UTF-16 code units
        #[arg(long, default_value_t = DEFAULT_MAX_STRING_UNITS)]
        max_string_units: usize,
        /// Reject enumeration values with no defined constant
        #[arg(long)]
        strict: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show field offsets of the native records
    Layout {
        /// Pointer width (32 or 64)
        #[arg(short, long, default_value = "64")]
        pointer_width: PointerWidth,
    },
    /// Write a sample dump containing one package record
    Sample {
        /// Output file
        output: String,
        /// Base address for the dump
        #[arg(short, long, value_parser = parse_address, default_value = "0x10000")]
        base: u64,
        /// Pointer width (32 or 64)
        #[arg(short, long, default_value = "64")]
        pointer_width: PointerWidth,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        shell: Shell,
    },
}

/// Parse a hex (`0x`-prefixed) or decimal address
fn parse_address(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse::<u64>(),
    };
    parsed.map_err(|e| format!("Invalid address '{}': {}", s, e))
}

fn print_package(info: &PackageInfo) {
    let text = |value: Option<&str>| value.unwrap_or("none").to_string();
    let time = |value: Option<chrono::NaiveDateTime>| {
        value.map_or_else(|| "unset".to_string(), |t| t.to_string())
    };

    println!("Package: {}", text(info.package_name()));
    println!("  Display name: {}", text(info.display_name()));
    println!("  Description: {}", text(info.description()));
    println!("  State: {}", info.package_state());
    println!("  Release type: {}", info.release_type());
    println!("  Applicable: {}", info.applicable());
    println!("  Installed: {}", time(info.install_time()));
    println!("  Created: {}", time(info.creation_time()));
    println!("  Last updated: {}", time(info.last_update_time()));
    println!("  Company: {}", text(info.company()));
    println!("  Copyright: {}", text(info.copyright()));
    println!("  Product: {} {}", text(info.product_name()), text(info.product_version()));
    println!("  Install client: {}", text(info.install_client()));
    println!("  Install package: {}", text(info.install_package_name()));
    println!("  Restart required: {}", info.restart_required());
    println!("  Fully offline: {}", info.fully_offline());
    println!("  Support: {}", text(info.support_information()));

    println!("  Custom properties: {}", info.custom_properties().len());
    for property in info.custom_properties() {
        println!(
            "    {}{} = {}",
            property.path().map(|p| format!("{}\\", p)).unwrap_or_default(),
            text(property.name()),
            text(property.value())
        );
    }

    println!("  Features: {}", info.features().len());
    for feature in info.features() {
        println!("    {} ({})", text(feature.feature_name()), feature.state());
    }
}

fn sample_record() -> PackageRecord {
    let at = |y, mo, d, h, mi| {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .and_then(|value| SystemTime::from_naive(&value))
            .unwrap_or_default()
    };

    PackageRecord {
        package_name: Some("Package_for_KB5005565~31bf3856ad364e35~amd64~~19041.1237.1.8".to_string()),
        package_state: PackageFeatureState::Installed,
        release_type: ReleaseType::SecurityUpdate,
        install_time: at(2021, 9, 15, 8, 12),
        applicable: true,
        copyright: Some("Copyright (c) Microsoft Corporation. All Rights Reserved.".to_string()),
        company: Some("Microsoft Corporation".to_string()),
        creation_time: at(2021, 9, 2, 19, 40),
        display_name: Some("Security Update for Microsoft Windows (KB5005565)".to_string()),
        description: Some("Fix for KB5005565".to_string()),
        install_client: Some("UpdateAgentLCU".to_string()),
        install_package_name: Some("update.mum".to_string()),
        last_update_time: at(2021, 9, 15, 8, 14),
        product_name: Some("Microsoft-Windows-Foundation".to_string()),
        product_version: Some("10.0.19041.1237".to_string()),
        restart_required: RestartType::Required,
        fully_offline: FullyOfflineInstallableType::Undetermined,
        support_information: Some("http://support.microsoft.com/?kbid=5005565".to_string()),
        ..Default::default()
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect {
            dump,
            base,
            address,
            pointer_width,
            max_string_units,
            strict,
            json,
        }) => {
            info!("Inspecting {} package record at {:#x} in {}", pointer_width, address, dump);

            let image = MemoryImage::load(&dump, Address(base))?;
            let options = DecodeOptions {
                pointer_width,
                max_string_units,
                strict_enums: strict,
            };
            let package = PackageInfo::from_address(&image, Address(address), &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&package)?);
            } else {
                print_package(&package);
            }
            Ok(())
        }
        Some(Commands::Layout { pointer_width }) => {
            let layout = Layout::new(pointer_width);
            for record in layout.records() {
                println!("{} ({}, {} bytes):", record.name(), pointer_width, record.size());
                for field in record.fields() {
                    println!(
                        "  {:>4}  {:<22} {:<10} {} bytes",
                        field.offset,
                        field.name,
                        field.kind.as_str(),
                        field.size
                    );
                }
                println!();
            }
            Ok(())
        }
        Some(Commands::Sample {
            output,
            base,
            pointer_width,
        }) => {
            let properties = [
                CustomProperty::new(
                    Some("Identifier".to_string()),
                    Some("KB5005565".to_string()),
                    Some("\\Microsoft-Windows-Foundation".to_string()),
                ),
                CustomProperty::new(
                    Some("Language".to_string()),
                    Some("neutral".to_string()),
                    None,
                ),
            ];
            let features = [
                Feature::new(Some("NetFx3".to_string()), PackageFeatureState::Staged),
                Feature::new(Some("TelnetClient".to_string()), PackageFeatureState::Installed),
                Feature::new(Some("SMB1Protocol".to_string()), PackageFeatureState::NotPresent),
            ];

            let mut builder = ImageBuilder::new(Address(base), pointer_width);
            let address = builder.write_package(&sample_record(), &properties, &features)?;
            let image = builder.finish();
            image.save(&output)?;

            println!("Wrote {} sample dump to {} ({} bytes)", pointer_width, output, image.len());
            println!("  Base: {}", image.base());
            println!("  Package record: {}", address);
            println!(
                "Inspect with: dismpkg inspect {} --base {} --address {} --pointer-width {}",
                output,
                image.base(),
                address,
                pointer_width.bytes() * 8
            );
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "dismpkg", &mut std::io::stdout());
            Ok(())
        }
        None => {
            println!("dismpkg v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'dismpkg --help' for usage information");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x10000"), Ok(0x10000));
        assert_eq!(parse_address("0X7FF6_0000_0000"), Ok(0x7ff6_0000_0000));
        assert_eq!(parse_address("4096"), Ok(4096));
        assert!(parse_address("0xZZ").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from([
            "dismpkg", "inspect", "dump.bin", "--base", "0x1000", "--address", "0x1010",
            "--pointer-width", "32", "--strict", "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Inspect {
                base,
                address,
                pointer_width,
                strict,
                json,
                ..
            }) => {
                assert_eq!(base, 0x1000);
                assert_eq!(address, 0x1010);
                assert_eq!(pointer_width, PointerWidth::Bits32);
                assert!(strict);
                assert!(json);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sample_record_decodes() {
        let mut builder = ImageBuilder::new(Address(0x10000), PointerWidth::Bits64);
        let address = builder.write_package(&sample_record(), &[], &[]).unwrap();
        let image = builder.finish();

        let options = DecodeOptions::with_pointer_width(PointerWidth::Bits64);
        let info = PackageInfo::from_address(&image, address, &options).unwrap();
        assert_eq!(info.release_type(), ReleaseType::SecurityUpdate);
        assert!(info.install_time().is_some());
    }
}
