#![cfg(not(test))]

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate failure;

mod library;

use std::process::exit;

use docopt::Docopt;
use failure::Fallible;
use rustyline::error::ReadlineError;

use waylog_api::Options;

const USAGE: &'static str = "
waylog repl

Usage:
  waylogi [options]
  waylogi (-h | --help)

Options:
  --help              Show this screen.
  --program=NAME      Load a built-in example program by name (append, member, call).
  --max-answers=N     Maximum number of answers to print for a goal [default: 1].
  --max-steps=N       Maximum number of proof-search steps before giving up [default: 10000].
";

/// This struct represents the various command line options available.
#[derive(Debug, Deserialize)]
struct Args {
    flag_program: Option<String>,
    flag_max_answers: usize,
    flag_max_steps: usize,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            max_steps: Some(self.flag_max_steps),
            max_answers: Some(self.flag_max_answers),
        }
    }
}

/// A loaded example with its type-checked environment attached.
struct Loaded {
    example: library::Example,
    env: waylog_ti::PredEnv,
}

impl Loaded {
    fn new(example: library::Example) -> Fallible<Loaded> {
        let (_, env) = waylog_api::typecheck(example.ir_program.clone())
            .map_err(|e| format_err!("type error: {}", e))?;
        Ok(Loaded { example, env })
    }

    fn run(&self, options: &Options) -> Fallible<()> {
        let stream = waylog_api::prove(
            self.example.rt_program.clone(),
            self.example.goal.clone(),
            options,
        );
        let mut found = 0;
        for answer in stream {
            match answer {
                Ok(subst) => {
                    found += 1;
                    let bindings: Vec<String> = self
                        .example
                        .goal_vars
                        .iter()
                        .map(|(name, v)| format!("{} = {:?}", name, subst.apply(&waylog_ir::Term::Flex(*v))))
                        .collect();
                    println!("{}", bindings.join(", "));
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    break;
                }
            }
        }
        if found == 0 {
            println!("No possible solution.");
        }
        Ok(())
    }
}

fn run() -> Fallible<()> {
    let args: &Args = &Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_max_steps == 0 {
        eprintln!("error: max-steps must be at least 1");
        exit(1);
    }

    let mut prog = match &args.flag_program {
        Some(name) => match library::lookup(name) {
            Some(example) => Some(Loaded::new(example)?),
            None => {
                eprintln!("error: no such example program: {}", name);
                exit(1);
            }
        },
        None => None,
    };

    let mut editor = rustyline::Editor::<()>::new()?;
    readline_loop(&mut editor, "?- ", |rl, line| {
        if let Err(e) = process(args, line, rl, &mut prog) {
            eprintln!("error: {}", e);
        }
    })
}

/// Reads input lines from the user. Lines start with the string given by `prompt`.
/// Each line the user enters is passed to the function `f` for processing.
///
/// The loop terminates (and the program ends) when EOF is reached or if an error
/// occurs while reading the next line.
fn readline_loop<F>(rl: &mut rustyline::Editor<()>, prompt: &str, mut f: F) -> Fallible<()>
where
    F: FnMut(&mut rustyline::Editor<()>, &str),
{
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                rl.add_history_entry(&line);
                f(rl, &line);
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => Err(e)?,
        }
    }
    Ok(())
}

/// Process a single REPL command.
fn process(
    args: &Args,
    command: &str,
    _rl: &mut rustyline::Editor<()>,
    prog: &mut Option<Loaded>,
) -> Fallible<()> {
    let command = command.trim();
    if command == "help" || command == "h" {
        help();
    } else if command == "list" {
        for name in library::names() {
            println!("  {}", name);
        }
    } else if command.starts_with("load ") {
        let name = command["load ".len()..].trim();
        let example = library::lookup(name).ok_or_else(|| format_err!("no such example program: {}", name))?;
        *prog = Some(Loaded::new(example)?);
    } else if command == "print" {
        let prog = prog.as_ref().ok_or_else(|| format_err!("no program currently loaded; type 'help' to see available commands"))?;
        println!("{}", prog.example.description);
    } else if command == "typed" {
        let prog = prog.as_ref().ok_or_else(|| format_err!("no program currently loaded; type 'help' to see available commands"))?;
        for group in &prog.example.ir_program.groups {
            for pred in &group.predicates {
                if let Some(poly) = prog.env.lookup(pred.name, pred.arity) {
                    println!("{:?}", poly);
                }
            }
        }
    } else if command == "run" || command.is_empty() {
        let prog = prog.as_ref().ok_or_else(|| format_err!("no program currently loaded; type 'help' to see available commands"))?;
        prog.run(&args.options())?;
    } else {
        eprintln!("unknown command: {} (type 'help' to see available commands)", command);
    }
    Ok(())
}

/// Print out help for commands in interpreter mode.
fn help() {
    println!("Commands:");
    println!("  help          print this output");
    println!("  list          list the built-in example programs");
    println!("  load <name>   load an example program by name");
    println!("  print         print the current program's description");
    println!("  typed         print the current program's inferred predicate types");
    println!("  run           search for answers to the current program's bundled goal");
}

fn main() {
    use std::io::Write;

    ::std::process::exit(match run() {
        Ok(_) => 0,
        Err(ref e) => {
            write!(&mut ::std::io::stderr(), "{}", e).expect("Error writing to stderr");
            1
        }
    });
}
