use connect_four_web::client::Sender;
use connect_four_web::connect_four::{Cell, Grid, PlayerNum};
use connect_four_web::messages::{Outcome, RawMove, Response};
use connect_four_web::session::{self, Session, Sessions};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use tracing::{info, warn};

#[derive(Copy, Clone, Debug)]
enum Mode {
    Setup,
    InGame,
    NewGame,
}

#[tracing::instrument]
fn main() {
    let file_appender = tracing_appender::rolling::daily("./logs", "connect-four.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let mut sessions: Sessions = Sessions::new();
    let id = session::session_id();
    sessions.insert(id.clone(), Session::new());
    info!("created session {}", id);

    let (tx1, rx1) = mpsc::channel();
    let (tx2, rx2) = mpsc::channel();
    let senders = [Sender(tx1), Sender(tx2)];
    let receivers = [rx1, rx2];

    // One hot-seat session: both players share this terminal
    if let Some(session) = sessions.get_mut(&id) {
        if let Err(err) = run(session, &senders, &receivers) {
            warn!("terminal input failed: {}", err);
        }
    }
    sessions.remove(&id);
    info!("session {} closed", id);
}

fn run(
    session: &mut Session,
    senders: &[Sender; 2],
    receivers: &[Receiver<String>; 2],
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut mode = Mode::Setup;
    let mut prompt = PlayerNum::P1;

    println!("Connect Four");
    loop {
        let line = match read_line(&mut input, prompt, mode)? {
            Some(line) => line,
            None => return Ok(()),
        };
        let msg = match mode {
            Mode::Setup => serde_json::to_string(&line.trim()).unwrap(),
            Mode::InGame => {
                let column: usize = match line.trim().parse() {
                    Ok(column) => column,
                    Err(_) => {
                        println!("Enter a column number.");
                        continue;
                    }
                };
                serde_json::to_string(&RawMove { column }).unwrap()
            }
            Mode::NewGame => {
                let choice = matches!(line.trim(), "y" | "Y" | "yes");
                serde_json::to_string(&choice).unwrap()
            }
        };
        let (client, opponent) = match prompt {
            PlayerNum::P1 => (&senders[0], &senders[1]),
            PlayerNum::P2 => (&senders[1], &senders[0]),
        };
        let answered_new_game = matches!(mode, Mode::NewGame);
        session.handle_message(prompt, &msg, client, opponent);
        if session.is_over() {
            println!("Thanks for playing!");
            return Ok(());
        }

        for response in drain(&receivers[0]) {
            apply(PlayerNum::P1, response, &mut mode, &mut prompt);
        }
        for response in drain(&receivers[1]) {
            apply(PlayerNum::P2, response, &mut mode, &mut prompt);
        }
        // A stored new-game choice produces no response; hand the question
        // to the other player
        if answered_new_game && matches!(mode, Mode::NewGame) {
            prompt = PlayerNum::P2;
        }
    }
}

fn read_line(
    input: &mut impl BufRead,
    prompt: PlayerNum,
    mode: Mode,
) -> io::Result<Option<String>> {
    match mode {
        Mode::Setup => print!("Player {}: choose a color: ", label(prompt)),
        Mode::InGame => print!("Player {}: drop into which column? ", label(prompt)),
        Mode::NewGame => print!("Player {}: play again? (y/n): ", label(prompt)),
    }
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn drain(receiver: &Receiver<String>) -> Vec<Response> {
    let mut responses = Vec::new();
    while let Ok(msg) = receiver.try_recv() {
        match serde_json::from_str(&msg) {
            Ok(response) => responses.push(response),
            Err(err) => warn!("dropped malformed response: {}", err),
        }
    }
    responses
}

// Reflect a session response on the shared terminal. Messages addressed to
// both players (grids, draws) are printed only from Player 1's channel so
// they show up once.
fn apply(viewer: PlayerNum, response: Response, mode: &mut Mode, prompt: &mut PlayerNum) {
    match response {
        Response::ColorAccepted { player_num } => {
            println!("Player {} color locked in.", label(player_num));
            *prompt = player_num.other();
        }
        Response::ColorRejected { reason } => {
            println!("{}.", reason);
        }
        Response::GameStart {
            grid,
            player,
            player_num,
        } => {
            println!(
                "Player {} plays {}.",
                label(player_num),
                player.color().get()
            );
            if viewer == PlayerNum::P1 {
                render_grid(&grid);
                *mode = Mode::InGame;
                *prompt = PlayerNum::P1;
            }
        }
        Response::PiecePlaced {
            player_num, grid, ..
        } => {
            if viewer == PlayerNum::P1 {
                render_grid(&grid);
                *prompt = player_num.other();
            }
        }
        Response::ColumnFull { column } => {
            println!("Column {} is full; pick another.", column);
        }
        Response::MoveRejected { reason } => {
            println!("{}.", reason);
        }
        Response::GameEnd { outcome, grid } => {
            if viewer == PlayerNum::P1 {
                render_grid(&grid);
                *mode = Mode::NewGame;
                *prompt = PlayerNum::P1;
            }
            match outcome {
                Outcome::Win => println!("Player {} won!", label(viewer)),
                Outcome::Lose => {}
                Outcome::Draw => {
                    if viewer == PlayerNum::P1 {
                        println!("Tie!");
                    }
                }
            }
        }
        Response::SetupOpen => {
            if viewer == PlayerNum::P1 {
                println!("New game: pick your colors.");
                *mode = Mode::Setup;
                *prompt = PlayerNum::P1;
            }
        }
    }
}

fn render_grid(grid: &Grid) {
    let header: String = (0..grid.width()).map(|index| format!("{} ", index)).collect();
    println!("{}", header);
    for row in grid.get() {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => ". ",
                Cell::Piece {
                    player_num: PlayerNum::P1,
                } => "1 ",
                Cell::Piece {
                    player_num: PlayerNum::P2,
                } => "2 ",
            })
            .collect();
        println!("{}", line);
    }
}

fn label(player_num: PlayerNum) -> &'static str {
    match player_num {
        PlayerNum::P1 => "1",
        PlayerNum::P2 => "2",
    }
}
