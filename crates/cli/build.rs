use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("sydsvenskan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read the Sydsvenskan news day listing and search the site")
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"])
                .global(true),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30").global(true))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA").global(true))
        .arg(
            clap::arg!(--"base-url" <URL> "Site root; the listing and search endpoints are derived from it")
                .global(true),
        )
        .arg(clap::arg!(-v --verbose "Enable progress output and debug logging").global(true))
        .subcommand(
            clap::Command::new("newsday")
                .about("Print every article on the news day listing")
                .arg(clap::arg!(--pretty "Pretty print JSON output")),
        )
        .subcommand(
            clap::Command::new("search")
                .about("Search the site and print hits as they arrive")
                .arg(clap::arg!(<QUERY> "Search query"))
                .arg(clap::arg!(-n --limit <NUM> "Stop after this many hits"))
                .arg(clap::arg!(--preamble "Append the preamble to each hit (text only)"))
                .arg(clap::arg!(--premium "Mark paywalled hits with [+] (text only)")),
        )
        .subcommand(
            clap::Command::new("completions")
                .about("Print a shell completion script")
                .arg(clap::arg!(<SHELL> "Target shell").value_parser(["bash", "zsh", "fish", "powershell", "elvish"])),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "sydsvenskan", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "sydsvenskan", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "sydsvenskan", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "sydsvenskan", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
