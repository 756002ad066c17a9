//! One game against the referee
//!
//! We always play as Player A; moves read from `move_file` are the
//! opponent's and are applied as Player B.

use log::{debug, info, warn};

use crate::board::{Board, Player};
use crate::config::SessionConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::protocol::{canonical, Referee, TurnSignal};
use crate::rules::{apply_move, claim_edge, EdgeError, EdgeErrorKind, MoveStatus};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The referee ended the game; final box counts
    Finished { ours: usize, theirs: usize },
    /// The opponent sent a move that failed validation
    ForfeitWin(EdgeErrorKind),
}

pub struct Session {
    board: Board,
    engine: Engine,
    referee: Referee,
    config: SessionConfig,
}

impl Session {
    pub fn new(engine: Engine, config: SessionConfig) -> Self {
        Self {
            board: Board::with_policy(config.claim_policy),
            referee: Referee::new(&config.dir, &config.team),
            engine,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn referee(&self) -> &Referee {
        &self.referee
    }

    /// Play until the referee ends the game or the opponent forfeits.
    pub fn run(&mut self) -> Result<Outcome> {
        self.engine.new_game();
        info!("playing as {} in {}", self.referee.team(), self.referee.dir().display());

        loop {
            let signal = self.referee.await_turn(self.config.poll_interval());
            if let Some(outcome) = self.take_turn(signal)? {
                info!("game over: {:?}", outcome);
                return Ok(outcome);
            }
        }
    }

    /// Handle one turn signal. Returns the outcome once the game is over.
    pub fn take_turn(&mut self, signal: TurnSignal) -> Result<Option<Outcome>> {
        if signal == TurnSignal::End {
            return Ok(Some(Outcome::Finished {
                ours: self.board.boxes_owned(Player::A),
                theirs: self.board.boxes_owned(Player::B),
            }));
        }

        if let Some(mv) = self.referee.read_opponent_move()? {
            let (v1, v2) = canonical(mv.v1, mv.v2);
            match apply_move(&mut self.board, Player::B, v1, v2) {
                Ok(MoveStatus::Pass) => debug!("opponent passed"),
                Ok(MoveStatus::Applied { completed, .. }) => {
                    debug!("opponent played {} {} closing {}", v1, v2, completed)
                }
                Err(err) => return Ok(Some(self.forfeit(err))),
            }
        }

        match signal {
            TurnSignal::Go => self.play_move()?,
            TurnSignal::Pass => {
                debug!("passing");
                self.referee.write_pass()?;
            }
            TurnSignal::End => {}
        }

        Ok(None)
    }

    fn play_move(&mut self) -> Result<()> {
        let result = self.engine.choose_move(&self.board, Player::A);
        match result.best_move {
            Some(edge) => {
                let record = claim_edge(&mut self.board, edge.id, Player::A);
                info!(
                    "playing {} {} (score {}, closes {})",
                    edge.v1,
                    edge.v2,
                    result.score,
                    record.completed_count()
                );
                self.referee.write_move(edge.v1, edge.v2)?;
            }
            None => {
                warn!("asked to move on a full board, passing");
                self.referee.write_pass()?;
            }
        }
        debug!("board after our move:\n{}", self.board);
        Ok(())
    }

    fn forfeit(&self, err: EdgeError) -> Outcome {
        warn!("opponent made an error: {}", err);
        Outcome::ForfeitWin(err.kind())
    }
}
