use console::style;
use qcal::{Environment, Interpreter};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    let interpreter = Interpreter::new();
    let mut env = Environment::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{} ", style(">").black().bright())?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break, // EOF
        };
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.evaluate(&line, &mut env) {
            Ok(val) => writeln!(stdout, "{}", val)?,
            Err(errors) => {
                for err in errors {
                    eprintln!("{}", style(err.into_value()).red());
                }
            }
        }
    }

    writeln!(stdout)
}
