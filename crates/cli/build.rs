use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("pith")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract the main content of web pages")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (html, text, markdown, json, density)")
                .value_name("FORMAT")
                .default_value("html")
                .value_parser(["html", "text", "markdown", "json", "density"]),
        )
        .arg(clap::arg!(--frontmatter "Include TOML frontmatter (Markdown only)"))
        .arg(clap::arg!(--"min-length" <BYTES> "Text length at which the leash starts growing").default_value("0"))
        .arg(clap::arg!(--"max-length" <BYTES> "Text length at which the leash reaches its maximum").default_value("400"))
        .arg(clap::arg!(--"min-leash" <BLOCKS> "Smallest leash, in blocks").default_value("0"))
        .arg(clap::arg!(--"max-leash" <BLOCKS> "Largest leash, in blocks").default_value("40"))
        .arg(clap::arg!(--indent <N> "Indentation width of HTML output, in spaces").default_value("4"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(-v --verbose "Print progress and debug logs to stderr"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate a shell completion script and exit")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "pith", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "pith", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "pith", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "pith", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
