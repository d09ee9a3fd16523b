// Simple command-line application to play chess for two players
//
// Commands:
//   e2 e4         move a piece (also `e2e4`)
//   e7 e8 N       move with promotion (queen if omitted)
//   e2 e4 draw?   move and offer a draw
//   draw          accept the opponent's draw offer
//   resign        resign the game
//
// Set `RUST_LOG=castellan=debug` to see why a move was rejected.

use castellan::{board::PrettyStyle, Game, Move, PlayError};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

fn play(game: &mut Game, cmd: &str) -> Result<(), PlayError> {
    match cmd {
        "resign" => game.resign().map(|_| ()),
        "draw" => game.accept_draw().map(|_| ()),
        _ => {
            let (text, offer) = match cmd.strip_suffix("draw?") {
                Some(rest) => (rest.trim_end(), true),
                None => (cmd, false),
            };
            let mv = Move::from_str(text)?;
            if offer {
                game.play_offering_draw(mv)?;
            } else {
                game.play(mv)?;
            }
            Ok(())
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut stdin = io::stdin().lock();
    let mut game = Game::new_initial();
    let mut redraw = true;

    loop {
        if let Some(outcome) = game.outcome() {
            println!("{}", game.board().pretty(PrettyStyle::Symbols));
            println!("Game finished: {}", outcome);
            let moves = game.iter().map(|m| m.to_string()).collect::<Vec<_>>();
            println!("Moves: {}", moves.join(" "));
            break;
        }

        if redraw {
            println!("{}", game.board().pretty(PrettyStyle::Symbols));
        }
        if game.is_check() {
            println!("Check!");
        }
        if game.is_draw_offered() {
            println!("Your opponent offers a draw. Type `draw` to accept or `resign` to resign.");
        }
        print!("{}'s move: ", game.side().as_long_str());
        io::stdout().flush()?;

        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }
        let cmd = s.trim();
        if cmd.is_empty() {
            redraw = false;
            continue;
        }

        match play(&mut game, cmd) {
            Ok(()) => redraw = true,
            Err(e) => {
                println!("Illegal move! Try again. ({})", e);
                redraw = false;
            }
        }
        println!();
    }

    Ok(())
}
