//! Interactive text menu.
//!
//! ```text
//! --- COVID-19 TRACKER ---
//! 1. Global Statistics
//! 2. Country Statistics
//! 3. Historical Country Statistics
//! 4. Exit
//! ```
//!
//! Input and output are generic so sessions can be scripted in tests.

use crate::config::clamp_days;
use crate::tracker::Tracker;
use std::io::{self, BufRead, Write};

const GOODBYE: &str = "\nExiting COVID-19 Tracker....";

/// Parse a day count typed by the user; only positive whole numbers are accepted.
pub fn parse_days(input: &str) -> Option<u32> {
    match input.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Only a literal "yes" (any case, surrounding whitespace ignored) keeps the session going.
pub fn wants_to_continue(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Print `prompt`, then read one line. `None` on end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Run the menu until the user exits, declines to continue, or input ends.
pub fn run<R: BufRead, W: Write>(tracker: &Tracker, mut input: R, mut out: W) -> io::Result<()> {
    loop {
        writeln!(out, "\n--- COVID-19 TRACKER ---")?;
        writeln!(out, "1. Global Statistics")?;
        writeln!(out, "2. Country Statistics")?;
        writeln!(out, "3. Historical Country Statistics")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = ask(&mut input, &mut out, "\nEnter your option (1-4): ")? else {
            break;
        };

        match choice.trim() {
            "1" => tracker.show_global(&mut out)?,
            "2" => {
                let Some(country) = ask(&mut input, &mut out, "\nEnter country name: ")? else {
                    break;
                };
                tracker.show_country(&mut out, &country)?;
            }
            "3" => {
                let Some(country) = ask(&mut input, &mut out, "Enter country name: ")? else {
                    break;
                };
                let Some(days) = ask(
                    &mut input,
                    &mut out,
                    "Enter number of days for historical data (max 30): ",
                )?
                else {
                    break;
                };
                match parse_days(&days) {
                    Some(days) => {
                        tracker.plot_history(&mut out, &country, clamp_days(days))?;
                    }
                    None => writeln!(out, "\nPlease enter a positive whole number of days.")?,
                }
            }
            "4" => break,
            _ => {
                writeln!(out, "\nInvalid choice. Please try again.")?;
                continue;
            }
        }

        let again = ask(&mut input, &mut out, "\nDo you want to continue? (yes/no): ")?;
        if !again.as_deref().is_some_and(wants_to_continue) {
            break;
        }
    }
    writeln!(out, "{GOODBYE}")?;
    out.flush()
}
