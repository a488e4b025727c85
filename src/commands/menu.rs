//! Interactive menu - the default when no subcommand is given

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

use super::reset::{self, ResetOptions};
use super::show;
use super::utils::{self, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Reset,
    View,
    Exit,
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim() {
        "1" => Some(Choice::Reset),
        "2" => Some(Choice::View),
        "3" | "q" | "Q" => Some(Choice::Exit),
        _ => None,
    }
}

/// Read a menu choice, asking again on invalid input
///
/// End of input counts as exit.
fn read_choice() -> Result<Choice> {
    let stdin = io::stdin();
    loop {
        print!("Choose an option [1-3]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read from stdin")?;
        if read == 0 {
            println!();
            return Ok(Choice::Exit);
        }

        if let Some(choice) = parse_choice(&input) {
            return Ok(choice);
        }
        println!("{} {}", "Invalid choice:".red(), input.trim());
    }
}

fn print_menu() {
    println!();
    println!("{}", "=== Windsurf Reset Tool ===".green());
    println!("Resets your Windsurf device identifiers, with an optional backup of the existing configuration.");
    println!();
    println!("  [1] Reset device identifiers");
    println!("  [2] View current configuration");
    println!("  [3] Exit");
    println!();
}

/// Run the menu loop
///
/// A failed operation is reported and the menu continues.
pub fn execute(target: &Target) -> Result<()> {
    loop {
        print_menu();

        let outcome = match read_choice()? {
            Choice::Reset => reset::execute(
                target,
                &ResetOptions {
                    backup: None,
                    yes: false,
                },
            ),
            Choice::View => show::execute(target),
            Choice::Exit => break,
        };

        if let Err(e) = outcome {
            eprintln!("{} {:#}", "Error:".red(), e);
        }

        if utils::ask_yes_no("Would you like to perform another operation?")? != Some(true) {
            break;
        }
    }

    println!("Thank you for using the Windsurf Reset Tool!");
    Ok(())
}
