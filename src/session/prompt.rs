//! Interactive console setup: game type, first mover and board layout,
//! each re-asked until the answer is valid.

use std::io::{BufRead, Write};

use log::debug;

use crate::error::GameError;
use crate::game::BoardLayout;

use super::game_loop::GameMode;

/// Read one line; end of input is an error rather than an endless retry.
fn read_line<R: BufRead>(input: &mut R) -> Result<String, GameError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(GameError::InputClosed);
    }
    Ok(line.trim().to_string())
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String, GameError> {
    writeln!(out, "{question}")?;
    out.flush()?;
    read_line(input)
}

/// Ask for column heights and don't-care cells until they form a valid board.
pub fn prompt_layout<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<BoardLayout, GameError> {
    loop {
        let heights = ask(
            input,
            out,
            "Please enter the height for each column separated by single space.",
        )?;
        let dont_care = ask(
            input,
            out,
            "Please enter don't count cells separated by single space.\n \
             Ex. A2 B3, for column A and row 2 and column B and row 3",
        )?;

        match BoardLayout::parse(&heights, &dont_care) {
            Ok(layout) => return Ok(layout),
            Err(e) => {
                debug!("rejected board configuration: {e}");
                writeln!(out, "Invalid board configuration ({e}), please try again!")?;
            }
        }
    }
}

/// Ask for the game type and, against a human, who opens.
pub fn prompt_mode<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<GameMode, GameError> {
    loop {
        let answer = ask(
            input,
            out,
            "Please enter game type\n 0 - Computer versus Computer\n 1 - Human versus Computer",
        )?;
        match answer.as_str() {
            "0" => return Ok(GameMode::AiVsAi),
            "1" => break,
            _ => writeln!(out, "Invalid game type, please try again!")?,
        }
    }

    loop {
        let answer = ask(input, out, "Who will start first\n 0 - Computer\n 1 - Human")?;
        match answer.as_str() {
            "0" => return Ok(GameMode::HumanVsAi { human_first: false }),
            "1" => return Ok(GameMode::HumanVsAi { human_first: true }),
            _ => writeln!(out, "Invalid choice, please try again!")?,
        }
    }
}
