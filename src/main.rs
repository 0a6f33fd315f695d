//! Command-line front end
//!
//! Usage: treeperm [--limit N] [--json] [--pretty] [TREE]
//!
//! Reads the tree from the argument, or from stdin when it is omitted.
//! Settings come from `TREEPERM_*` environment variables (a `.env` file is
//! loaded first).

use dotenv::dotenv;
use std::error::Error;
use std::io::{Read, stdin};
use std::process::ExitCode;

use treeperm::service::{ParaphraseService, Response, ServiceConfig};
use treeperm::writer::to_pretty;

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    tree: Option<String>,
    limit: Option<String>,
    json: bool,
    pretty: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run(Args),
}

fn parse_args<I>(mut iter: I) -> Result<Command, String>
where
    I: Iterator<Item = String>,
{
    let mut args = Args::default();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--limit" | "-n" => {
                args.limit = Some(iter.next().ok_or("--limit needs a value")?);
            }
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            "--help" | "-h" => return Ok(Command::Help),
            _ if args.tree.is_none() => args.tree = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}\n{}", usage())),
        }
    }
    Ok(Command::Run(args))
}

fn usage() -> String {
    "Usage: treeperm [--limit N] [--json] [--pretty] [TREE]".to_string()
}

fn run() -> Result<ExitCode, Box<dyn Error>> {
    dotenv().ok();

    let args = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", usage());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Run(args) => args,
    };
    let config = ServiceConfig::from_env()?;
    let service = ParaphraseService::new(config);

    let tree = match args.tree {
        Some(tree) => tree,
        None => {
            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if args.json {
        let response = service.respond(Some(&tree), args.limit.as_deref());
        println!("{}", response.to_json());
        return Ok(match response {
            Response::Paraphrases { .. } => ExitCode::SUCCESS,
            Response::Error { .. } => ExitCode::FAILURE,
        });
    }

    if args.pretty {
        return Ok(match service.generate(Some(&tree), args.limit.as_deref()) {
            Ok(trees) => {
                for tree in &trees {
                    println!("{}\n", to_pretty(tree, 2));
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        });
    }

    match service.handle(Some(&tree), args.limit.as_deref()) {
        Ok(paraphrases) => {
            for paraphrase in paraphrases {
                println!("{}", paraphrase.tree);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Command, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_help_is_not_an_error() {
        assert_eq!(args(&["--help"]), Ok(Command::Help));
        assert_eq!(args(&["--json", "-h"]), Ok(Command::Help));
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            args(&["--limit", "5", "--pretty", "(NP (NN a))"]),
            Ok(Command::Run(Args {
                tree: Some("(NP (NN a))".to_string()),
                limit: Some("5".to_string()),
                json: false,
                pretty: true,
            }))
        );
        assert_eq!(args(&[]), Ok(Command::Run(Args::default())));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--limit"]).is_err());
        assert!(args(&["(NP (NN a))", "extra"]).unwrap_err().starts_with("unexpected argument: extra"));
    }
}
