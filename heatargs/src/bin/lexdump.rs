// Prints the tokens a response file expands to, one per line.

use std::path::Path;
use std::process::ExitCode;

use heatargs::response;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        println!("usage: heatargs-lex file_1 file_2 ...");
        println!("you may specify many files");
        return ExitCode::from(1);
    }

    let mut status = ExitCode::SUCCESS;
    for filename in &args[1..] {
        match response::read(Path::new(filename)) {
            Ok(lexed) => {
                println!("{}: {} tokens", filename, lexed.tokens.len());
                for token in &lexed.tokens {
                    println!("'{}'", token);
                }
                if let Some(e) = lexed.error {
                    eprintln!("cannot lex {}. error={}", filename, e);
                    status = ExitCode::from(1);
                }
            }
            Err(e) => {
                eprintln!("cannot read file {}.  {}", filename, e);
                status = ExitCode::from(1);
                continue;
            }
        }
        println!();
    }

    status
}
