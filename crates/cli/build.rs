use std::{env, fs, path::PathBuf};

use clap::{Arg, Command, arg, value_parser};

const CATEGORIES: [&str; 5] = ["psychology", "career", "coaching-story", "tips", "interview"];

fn category_arg() -> Arg {
    arg!(-c --category <CATEGORY> "Article category")
        .default_value("tips")
        .value_parser(CATEGORIES)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = Command::new("blockport")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn saved article pages into reviewable drafts")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Enable debug logging").global(true))
        .arg(
            arg!(--"config-dir" <DIR> "Directory holding a categories.json override")
                .value_name("DIR")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract a draft from a saved article page")
                .arg(arg!(<INPUT> "Local HTML file, or '-' for stdin"))
                .arg(category_arg())
                .arg(arg!(--"source-url" <URL> "URL the page was saved from"))
                .arg(arg!(--selector <SELECTOR> "CSS selector of the article body container"))
                .arg(arg!(--"blocks-only" "Print only the block array instead of a full draft"))
                .arg(
                    arg!(-o --output <FILE> "Output file (default: stdout)")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(arg!(--compact "Compact JSON output")),
        )
        .subcommand(
            Command::new("richtext")
                .about("Project a draft body (or a bare block array) into a rich-text document")
                .arg(arg!(<INPUT> "Draft JSON file, or '-' for stdin"))
                .arg(
                    arg!(-o --output <FILE> "Output file (default: stdout)")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(arg!(--compact "Compact JSON output")),
        )
        .subcommand(
            Command::new("title")
                .about("Lay out a thumbnail title")
                .arg(arg!(<TITLE> "Title text"))
                .arg(category_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate draft files")
                .arg(arg!(<FILE>... "Draft JSON files").value_parser(value_parser!(PathBuf))),
        )
        .subcommand(
            Command::new("preview")
                .about("Print a plain-text preview of a draft body")
                .arg(arg!(<INPUT> "Draft JSON file, or '-' for stdin"))
                .arg(arg!(-w --width <WIDTH> "Wrap lines at this many characters (0 = no wrapping)").default_value("0"))
                .arg(arg!(--links "Print link targets after linked text")),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "blockport", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "blockport", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "blockport", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "blockport", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
