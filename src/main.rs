//! Command-line demo for the expression compiler

use std::cell::Cell;
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;

use exprvm::{compile, Bindings, Vm};

/// Compile and evaluate arithmetic expressions.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Expressions to evaluate; reads lines from stdin when omitted.
    exprs: Vec<String>,

    /// Print the compiled bytecode before each result.
    #[arg(long)]
    bytecode: bool,

    /// Bind a variable, e.g. --var a=7.5 (repeatable).
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut bindings = Bindings::new();
    for var in &args.vars {
        let Some((name, value)) = var.split_once('=') else {
            eprintln!("--var expects NAME=VALUE, got `{var}`");
            return ExitCode::FAILURE;
        };
        let Ok(value) = value.parse() else {
            eprintln!("--var {var}: not a number");
            return ExitCode::FAILURE;
        };
        bindings.value(name, Rc::new(Cell::new(value)));
    }

    let vm = Vm::new();

    if args.exprs.is_empty() {
        repl(&bindings, &vm, args.bytecode)
    } else {
        let mut status = ExitCode::SUCCESS;
        for expr in &args.exprs {
            if run_one(expr, &bindings, &vm, args.bytecode).is_err() {
                status = ExitCode::FAILURE;
            }
        }
        status
    }
}

fn run_one(expr: &str, bindings: &Bindings, vm: &Vm, bytecode: bool) -> Result<(), ()> {
    let program = match compile(expr, bindings) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{expr}: {e}");
            return Err(());
        }
    };

    if bytecode {
        print!("{program}");
    }

    match vm.eval(&program) {
        Ok(value) => {
            println!("{value}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{expr}: {e}");
            Err(())
        }
    }
}

/// Line-oriented mode: one expression per stdin line, errors reported
/// per line without stopping.
fn repl(bindings: &Bindings, vm: &Vm, bytecode: bool) -> ExitCode {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = run_one(line, bindings, vm, bytecode);
    }
    ExitCode::SUCCESS
}
