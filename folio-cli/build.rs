use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the built-in formats registered by folio-babel.
// Build scripts can't depend on the crate they build, so the list is repeated.
const FORMATS: &[&str] = &["json", "markdown", "treeviz"];

fn input() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn format_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert and inspect stored editor documents")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("convert")
                .arg(input())
                .arg(format_arg("from"))
                .arg(format_arg("to"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("inspect").arg(input()).arg(format_arg("from")))
        .subcommand(
            Command::new("validate")
                .arg(input())
                .arg(format_arg("from"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        );

    generate_to(Bash, &mut cmd, "folio", &outdir)?;
    generate_to(Zsh, &mut cmd, "folio", &outdir)?;
    generate_to(Fish, &mut cmd, "folio", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
