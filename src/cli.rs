#![cfg(feature = "std")]

//! Line-oriented console front end over [`GameSession`].

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::board::Board;
use crate::common::{AttackResult, Coordinate};
use crate::config::BOARD_SIZE;
use crate::game::{GameError, GamePhase, GameSession, GameSummary, Side, TurnReport};
use crate::persist;
use crate::ship::Orientation;

const GRID: usize = BOARD_SIZE as usize;

/// Where the console game keeps its files, and how it paces the computer.
#[derive(Debug, Clone, Default)]
pub struct ConsoleOptions {
    /// Computer fleet layout, reused across runs.
    pub placement_file: Option<PathBuf>,
    /// Career statistics.
    pub stats_file: Option<PathBuf>,
    /// Pause before the computer fires.
    pub computer_delay: Duration,
}

/// Render `board` with row letters A-J and columns 1-10. Ships are drawn only
/// when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::from("    ");
    for col in 1..=GRID {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');
    for row in 0..GRID {
        let _ = write!(out, " {}  ", (b'A' + row as u8) as char);
        for col in 0..GRID {
            let _ = write!(out, "{:>3}", board.cell_symbol(Coordinate::new(row, col), reveal));
        }
        out.push('\n');
    }
    out
}

/// Parse `<coordinate> <H|V>`, e.g. `a5 v`. Only the first letter of the
/// orientation token counts.
pub fn parse_placement(input: &str) -> Result<(Coordinate, Orientation), String> {
    let mut parts = input.split_whitespace();
    let coord = parts.next().ok_or("Enter a coordinate and H or V (e.g. A1 H)")?;
    let coord: Coordinate = coord
        .parse()
        .map_err(|e| format!("Invalid coordinate: {}", e))?;
    let orientation = parts
        .next()
        .and_then(|p| p.chars().next())
        .and_then(Orientation::from_char)
        .ok_or("Please enter H or V for the orientation")?;
    if parts.next().is_some() {
        return Err("Too many values - use e.g. A1 H".to_string());
    }
    Ok((coord, orientation))
}

/// Sentence describing a resolved shot.
pub fn describe_turn(report: &TurnReport) -> String {
    let (who, fire, miss, hit, sink) = match report.shooter {
        Side::Player => ("You", "fire", "miss.", "hit!", "sink"),
        Side::Computer => ("Enemy", "fires", "misses.", "hits!", "sinks"),
    };
    match report.result {
        AttackResult::Miss => format!("{} {} at {} and {}", who, fire, report.target, miss),
        AttackResult::Hit(_) => format!("{} {} at {} and {}", who, fire, report.target, hit),
        AttackResult::Sunk(name) => {
            format!("{} {} the {} at {}!", who, sink, name, report.target)
        }
        AttackResult::AlreadyTried => format!("{} is already attacked.", report.target),
        AttackResult::Invalid => "Coordinate lies outside the battle grid.".to_string(),
    }
}

/// Console session bound to an input and an output stream.
pub struct Console<B, W> {
    input: B,
    output: W,
    options: ConsoleOptions,
}

impl<B: BufRead, W: Write> Console<B, W> {
    pub fn new(input: B, output: W, options: ConsoleOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play one game to the end. Returns `None` if the input runs out first.
    pub fn run<R: Rng>(&mut self, session: &mut GameSession<R>) -> anyhow::Result<Option<GameSummary>> {
        self.welcome()?;
        if !self.place_fleet(session)? {
            return Ok(None);
        }

        let saved = self
            .options
            .placement_file
            .as_deref()
            .and_then(persist::read_placement);
        let deployment = session.start_battle(saved.as_deref())?;
        if let Some(path) = self.options.placement_file.as_deref() {
            persist::save_generated(path, &deployment);
        }
        writeln!(self.output, "\nBattle commencing!")?;
        self.show_boards(session)?;

        loop {
            match session.phase() {
                GamePhase::PlayerTurn => {
                    if !self.player_turn(session)? {
                        return Ok(None);
                    }
                }
                GamePhase::ComputerTurn => {
                    writeln!(self.output, "\nEnemy turn.")?;
                    if !self.options.computer_delay.is_zero() {
                        thread::sleep(self.options.computer_delay);
                    }
                    let report = session.computer_turn()?;
                    writeln!(self.output, "{}", describe_turn(&report))?;
                    self.show_boards(session)?;
                }
                GamePhase::GameOver { .. } => break,
                GamePhase::PlacingShips => return Err(GameError::WrongPhase(session.phase()).into()),
            }
        }

        let summary = session.summary();
        if let Some(summary) = summary {
            self.finish(&summary)?;
        }
        Ok(summary)
    }

    fn welcome(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "=== Broadside ===\n\
             Rules:\n \
             - Grid size: 10x10 (A-J, 1-10)\n \
             - You and the computer each have 5 ships.\n \
             - Take turns firing at coordinates like A5 or D10.\n \
             - 'X' = hit, 'O' = miss, 'S' = your ship.\n \
             - Sink all enemy ships to win.\n"
        )
    }

    /// Returns `false` when input ended before the fleet was placed.
    fn place_fleet<R: Rng>(&mut self, session: &mut GameSession<R>) -> anyhow::Result<bool> {
        writeln!(self.output, "Place your ships (e.g. A5 H). Press enter for random placement.")?;
        while let Some(index) = session.next_unplaced_ship() {
            let ship = &session.player_board().fleet()[index];
            let (name, size) = (ship.name(), ship.size());
            write!(self.output, "{}", render_board(session.player_board(), true))?;
            let Some(line) = self.read_line(&format!("Place {} (length {}): ", name, size))? else {
                return Ok(false);
            };
            if line.trim().is_empty() {
                session.place_player_ship_randomly(index)?;
                continue;
            }
            match parse_placement(&line) {
                Ok((start, orientation)) => match session.place_player_ship(index, start, orientation) {
                    Ok(()) => writeln!(self.output, "{} positioned at {}.", name, start)?,
                    Err(GameError::Board(e)) => writeln!(
                        self.output,
                        "Invalid placement ({}). Ships must stay on the grid and not overlap.",
                        e
                    )?,
                    Err(e) => return Err(e.into()),
                },
                Err(msg) => writeln!(self.output, "{}", msg)?,
            }
        }
        Ok(true)
    }

    /// Returns `false` when input ended.
    fn player_turn<R: Rng>(&mut self, session: &mut GameSession<R>) -> anyhow::Result<bool> {
        writeln!(self.output, "\nYour turn.")?;
        loop {
            let Some(line) = self.read_line("Enter target (e.g., B7): ")? else {
                return Ok(false);
            };
            let target: Coordinate = match line.parse() {
                Ok(c) => c,
                Err(_) => {
                    writeln!(self.output, "Invalid coordinate. Use rows A-J and columns 1-10.")?;
                    continue;
                }
            };
            let report = session.player_attack(target)?;
            writeln!(self.output, "{}", describe_turn(&report))?;
            if report.result.is_resolved() {
                self.show_boards(session)?;
                return Ok(true);
            }
        }
    }

    fn finish(&mut self, summary: &GameSummary) -> io::Result<()> {
        match summary.winner {
            Side::Player => writeln!(self.output, "\nCongratulations, Admiral. You secured the seas!")?,
            Side::Computer => writeln!(self.output, "\nYour fleet has been destroyed. Mission failed.")?,
        }
        let Some(path) = self.options.stats_file.as_deref() else {
            return Ok(());
        };
        let mut stats = persist::load_stats(path);
        stats.record_game(
            summary.winner == Side::Player,
            summary.player_shots,
            summary.player_hits,
        );
        if let Err(e) = persist::save_stats(path, &stats) {
            log::warn!("{:#}", e);
        }
        writeln!(
            self.output,
            "Career: {} games, {} wins, {} losses, {:.1}% accuracy",
            stats.games_played,
            stats.games_won,
            stats.games_lost,
            stats.accuracy()
        )
    }

    fn show_boards<R: Rng>(&mut self, session: &GameSession<R>) -> io::Result<()> {
        writeln!(self.output, "\nYour Fleet:")?;
        write!(self.output, "{}", render_board(session.player_board(), true))?;
        writeln!(self.output, "\nEnemy Waters:")?;
        write!(self.output, "{}", render_board(session.computer_board(), false))
    }

    /// Prompt and read one line without its terminator. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}
