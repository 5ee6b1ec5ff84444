// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn pointer_width_arg() -> Arg {
    Arg::new("pointer_width")
        .short('p')
        .long("pointer-width")
        .default_value("64")
        .value_parser(["32", "64"])
        .help("Pointer width of the image (32 or 64)")
}

fn build_cli() -> Command {
    Command::new("dismpkg")
        .version(env!("CARGO_PKG_VERSION"))
        .author("dismpkg Contributors")
        .about("Decode native image servicing package metadata records")
        .subcommand_required(false)
        .subcommand(
            Command::new("inspect")
                .about("Decode a package record from a raw memory dump")
                .arg(Arg::new("dump").required(true).help("Path to the dump file"))
                .arg(
                    Arg::new("base")
                        .short('b')
                        .long("base")
                        .required(true)
                        .value_name("ADDR")
                        .help("Address the dump was captured from"),
                )
                .arg(
                    Arg::new("address")
                        .short('a')
                        .long("address")
                        .required(true)
                        .value_name("ADDR")
                        .help("Address of the package record inside the dump"),
                )
                .arg(pointer_width_arg())
                .arg(
                    Arg::new("max_string_units")
                        .long("max-string-units")
                        .default_value("32768")
                        .help("Longest string accepted, in UTF-16 code units"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(clap::ArgAction::SetTrue)
                        .help("Reject enumeration values with no defined constant"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(clap::ArgAction::SetTrue)
                        .help("Print JSON instead of text"),
                ),
        )
        .subcommand(
            Command::new("layout")
                .about("Show field offsets of the native records")
                .arg(pointer_width_arg()),
        )
        .subcommand(
            Command::new("sample")
                .about("Write a sample dump containing one package record")
                .arg(Arg::new("output").required(true).help("Output file"))
                .arg(
                    Arg::new("base")
                        .short('b')
                        .long("base")
                        .default_value("0x10000")
                        .help("Base address for the dump"),
                )
                .arg(pointer_width_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to render man page");

    let man_path = man_dir.join("dismpkg.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
