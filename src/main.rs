use std::io::{self, Read};

use promptling::{
    literal, one_of, parse_verbose, pattern, permutations_with_id, seq, Expression,
};

/// State extracted from the demo command language.
#[derive(Clone, Debug, Default)]
struct CommandState {
    action: Option<String>,
    service: Option<String>,
    env: Option<String>,
    verbose: bool,
}

/// Demo grammar: `<action> <service> [--env <name>] [--verbose]`, with the
/// flags accepted in any order.
fn command_grammar() -> Expression<CommandState> {
    let action = one_of![
        literal(pattern!("deploy"))
            .suggest(["deploy"])
            .update(|state: &mut CommandState, _| state.action = Some("deploy".into())),
        literal(pattern!("rollback"))
            .suggest(["rollback"])
            .update(|state: &mut CommandState, _| state.action = Some("rollback".into())),
        literal(pattern!("status"))
            .suggest(["status"])
            .update(|state: &mut CommandState, _| state.action = Some("status".into())),
    ];

    let service = literal(pattern!("(api|web|worker)"))
        .suggest(["api", "web", "worker"])
        .update(|state: &mut CommandState, caps| state.service = caps.get(1).map(str::to_string));

    let env_flag = seq![
        literal::<CommandState>(pattern!(" +--env +")).suggest(["--env"]),
        literal(pattern!("(staging|production)"))
            .suggest(["staging", "production"])
            .update(|state: &mut CommandState, caps| state.env = caps.get(1).map(str::to_string)),
    ];
    let verbose_flag = literal(pattern!(" +--verbose"))
        .suggest(["--verbose"])
        .update(|state: &mut CommandState, _| state.verbose = true);

    let flags = permutations_with_id(Vec::new(), vec![env_flag, verbose_flag.into()], "flags");

    seq![action, literal(pattern!(" +")), service, flags]
}

fn main() {
    let input = match parse_args() {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let input = input.trim_end_matches('\n').to_string();

    let grammar = command_grammar();
    let out = parse_verbose(&grammar, CommandState::default(), &input);

    println!("input:        {:?}", input);
    println!("matched:      {:?}", out.result.matching_part);
    println!("remainder:    {:?}", out.result.remainder);
    println!("state:        {:?}", out.result.state);
    if out.result.suggestions.is_empty() {
        println!("suggestions:  (none)");
    } else {
        println!("suggestions:");
        for (idx, suggestion) in out.result.suggestions.iter().enumerate() {
            println!("  {}. {}", idx + 1, suggestion.label);
        }
    }
    println!(
        "metrics:      {} nodes, {} literal attempts, {} generator calls in {:?}",
        out.metrics.nodes_evaluated, out.metrics.literal_attempts, out.metrics.generator_calls, out.metrics.total
    );
}

fn parse_args() -> Result<String, String> {
    let mut input: Option<String> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("promptling {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    match input {
        Some(value) => Ok(value),
        None => read_stdin_input(),
    }
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!(
        "promptling {version}

Interactive command-entry matching demo.

Matches input against a small `<action> <service> [flags]` grammar and prints
the matched prefix, extracted state, and completion suggestions.

Usage:
  promptling [OPTIONS] [--] <input...>
  promptling [OPTIONS] --input <text>

Options:
  -i, --input <text>   Input to match. If omitted, reads remaining args or
                       stdin when no args are provided.
  -h, --help           Show this help message.
  -V, --version        Print version information.

Exit codes:
  0  Success.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION")
    );
}
