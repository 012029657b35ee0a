// Command-line interface for folio
//
// Converts stored documents between Markdown and the editor's JSON, and helps
// look at what the codec makes of a given file.
//
// Usage:
//  folio <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  folio convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  folio inspect <input> [--from <format>]   - Print the decoded tree
//  folio validate <input> [--from <format>]  - Check the tree structure, exit 1 on violations
//  folio --list-formats                      - List available formats
//
// The source format is auto-detected from the file extension unless --from is given.
// Reading from stdin is done with "-" as input, which requires --from.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format,
// on top of the values coming from the configuration.
// Example:
//  folio doc.json --to markdown --extra-bullet-marker "*"

use clap::{Arg, ArgAction, Command, ValueHint};
use folio_babel::{validate, DocumentNode, FormatRegistry};
use folio_config::{FolioConfig, Loader};
use log::LevelFilter;
use std::collections::HashMap;
use std::fs;
use std::io::Read;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "validate", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            // A following value is anything that is not itself a flag. A lone
            // "*" or "-" counts as a value so bullet markers can be passed.
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| next == "-" || !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert and inspect stored editor documents")
        .long_about(
            "folio converts rich-text editor documents between the editor's JSON tree and\n\
            the Markdown used for storage.\n\n\
            Commands:\n  \
            - convert:  Transform between document formats (default)\n  \
            - inspect:  Print the decoded node tree\n  \
            - validate: Check the node tree for structural problems\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            folio doc.json --to markdown              # Encode editor JSON (stdout)\n  \
            folio notes.md --to json -o notes.json    # Decode to editor JSON file\n  \
            folio inspect notes.md                    # See what the decoder produced\n  \
            folio validate doc.json                   # Exit 1 if the tree is malformed",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log codec decisions to stderr (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown storage format (.md, .markdown)\n  \
                    - json:     Editor document tree (.json)\n  \
                    - treeviz:  Tree visualization, output only (.tree)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    folio convert doc.json --to markdown\n  \
                    folio convert notes.md --to json -o notes.json\n  \
                    folio doc.json --to markdown --extra-bullet-marker '*'",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the decoded node tree")
                .long_about(
                    "Decode a document and print its node tree.\n\n\
                    Extra Parameters:\n  \
                    --extra-show-marks false   Hide marks next to text leaves\n\n\
                    Examples:\n  \
                    folio inspect notes.md\n  \
                    folio inspect doc.json --extra-show-marks false",
                )
                .arg(input_arg())
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a document tree for structural problems")
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Report violations as a JSON array")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // If the first argument looks like a file, "convert" was implied
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            handle_inspect_command(input, &from, &extra_params, &config);
        }
        Some(("validate", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            handle_validate_command(input, &from, sub_matches.get_flag("json"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Route `folio_*` logs to stderr. `RUST_LOG` still applies when `-v` is absent.
fn init_logging(verbosity: u8) {
    let mut builder = env_logger::builder();
    builder.format_timestamp(None);
    if verbosity > 0 {
        let level = if verbosity > 1 {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        };
        builder
            .filter_module("folio", level)
            .filter_module("folio_babel", level)
            .filter_module("folio_config", level);
    }
    let _ = builder.try_init();
}

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(2);
        }
    }
}

/// Use `--from` when given, otherwise detect it from the input's extension.
fn resolve_from(input: &str, from_arg: Option<&String>) -> String {
    if let Some(from) = from_arg {
        return from.to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => {
            log::debug!("detected format '{detected}' for '{input}'");
            detected
        }
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    }
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn parse_input(input: &str, from: &str) -> DocumentNode {
    let registry = FormatRegistry::default();
    let source = read_input(input);
    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &FolioConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let doc = parse_input(input, from);

    let format_options = build_format_params(config, to, extra_params);
    let text = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print_text(&text),
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    input: &str,
    from: &str,
    extra_params: &HashMap<String, String>,
    config: &FolioConfig,
) {
    let doc = parse_input(input, from);
    let params = build_format_params(config, "treeviz", extra_params);
    let output = FormatRegistry::default()
        .serialize_with_options(&doc, "treeviz", &params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });
    print_text(&output);
}

/// Handle the validate command
fn handle_validate_command(input: &str, from: &str, as_json: bool) {
    let doc = parse_input(input, from);
    let errors = validate(&doc);

    if as_json {
        let report: Vec<_> = errors
            .iter()
            .map(|err| {
                serde_json::json!({
                    "path": err.path,
                    "message": err.to_string(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            }
        }
    } else if errors.is_empty() {
        println!("{input}: ok");
    } else {
        for err in &errors {
            println!("{input}: {err}");
        }
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "-",
        };
        let extensions: Vec<_> = format
            .file_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect();
        println!(
            "  {name:<10} {direction:<7} {:<20} {}",
            extensions.join(" "),
            format.description()
        );
    }
}

fn print_text(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> FolioConfig {
    let loader = Loader::new().with_optional_file("folio.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Fold extras that name a configuration knob into the configuration, so
/// they are validated the same way file values are.
fn apply_config_overrides(config: &mut FolioConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("show-marks") {
        config.inspect.show_marks = parse_bool_arg("show-marks", &raw);
    }
    if let Some(raw) = extra_params.remove("pretty") {
        config.json.pretty = parse_bool_arg("pretty", &raw);
    }
}

/// Parameters for a target format: configured values first, then the
/// remaining `--extra-*` parameters on top.
fn build_format_params(
    config: &FolioConfig,
    format: &str,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    match format {
        "markdown" => {
            params.insert(
                "bullet-marker".to_string(),
                config.markdown.bullet_marker.to_string(),
            );
            params.insert(
                "image-schemes".to_string(),
                config.markdown.image_schemes.join(","),
            );
        }
        "json" => {
            params.insert("pretty".to_string(), config.json.pretty.to_string());
        }
        "treeviz" => {
            params.insert(
                "show-marks".to_string(),
                config.inspect.show_marks.to_string(),
            );
        }
        _ => {}
    }

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
