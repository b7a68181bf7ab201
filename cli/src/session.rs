// SPDX-License-Identifier: MIT OR Apache-2.0

//! A CLI session: one engine, its event stream and optional archiving

use std::path::PathBuf;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use meshgo_core::{archive_finished_game, Engine, GameEvent};

use crate::command::{parse_command, Command, HELP};
use crate::render;

/// Output produced by one input line
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

pub struct Session {
    engine: Engine,
    events: Receiver<GameEvent>,
    archive_dir: Option<PathBuf>,
}

impl Session {
    pub fn new(mut engine: Engine, archive_dir: Option<PathBuf>) -> Self {
        let events = engine.subscribe();
        Self {
            engine,
            events,
            archive_dir,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Handle one input line. Errors are reported in the reply.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let mut reply = Reply::default();

        let command = match parse_command(line, self.engine.topology()) {
            Ok(Some(command)) => command,
            Ok(None) => return reply,
            Err(e) => {
                reply.lines.push(format!("error: {}", e));
                return reply;
            }
        };
        tracing::debug!(?command, "Executing command");

        let outcome = self.execute(&command, &mut reply);
        if let Err(e) = self.drain_events(&mut reply) {
            reply.lines.push(format!("error: {:#}", e));
        }

        match outcome {
            Ok(true) => reply.lines.push(render::render(&self.engine)),
            Ok(false) => {}
            Err(e) => reply.lines.push(format!("error: {:#}", e)),
        }
        reply
    }

    /// Run a command; returns whether the board should be shown afterwards
    fn execute(&mut self, command: &Command, reply: &mut Reply) -> Result<bool> {
        let turn = self.engine.turn();
        match command {
            Command::Play { color, point } => {
                self.engine.place_stone(*point, color.unwrap_or(turn))?;
                Ok(true)
            }
            Command::Pass(color) => {
                self.engine.pass(color.unwrap_or(turn))?;
                Ok(true)
            }
            Command::Resign(color) => {
                self.engine.resign(color.unwrap_or(turn))?;
                Ok(false)
            }
            Command::Undo => {
                self.engine.undo()?;
                Ok(true)
            }
            Command::Score => {
                let score = self.engine.calculate_area_score(self.engine.config().komi);
                reply.lines.push(serde_json::to_string(&score)?);
                Ok(false)
            }
            Command::Show => Ok(true),
            Command::Load { canonical, turn } => {
                self.engine.load_board_state(canonical, *turn)?;
                Ok(true)
            }
            Command::Reset => {
                self.engine.reset();
                Ok(true)
            }
            Command::Help => {
                reply.lines.push(HELP.to_string());
                Ok(false)
            }
            Command::Quit => {
                reply.quit = true;
                Ok(false)
            }
        }
    }

    /// Print pending events as JSON lines and archive a game that just ended
    fn drain_events(&self, reply: &mut Reply) -> Result<()> {
        let mut ended = false;
        for event in self.events.try_iter() {
            ended |= matches!(event, GameEvent::GameEnded { .. });
            reply
                .lines
                .push(serde_json::to_string(&event).context("Failed to serialize event")?);
        }

        if ended {
            if let Some(dir) = &self.archive_dir {
                let path = archive_finished_game(&self.engine.record(), dir)
                    .context("Failed to archive game")?;
                reply.lines.push(format!("archived {}", path.display()));
            }
        }
        Ok(())
    }
}
