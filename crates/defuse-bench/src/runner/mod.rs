mod metrics;

pub use metrics::DecisionSummary;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary};
use crate::config::{BenchmarkConfig, ResolvedOutputs};
use crate::logging::telemetry_dir;
use defuse_bot::{Agent, BotParams, ContextError, Policy, PolicyContext};
use defuse_core::game::actions::{ActionError, PlayOutcome};
use defuse_core::game::setup::{GameSetup, SetupError};
use defuse_core::game::state::{GameState, GameStatus};
use metrics::DecisionMetrics;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

/// Plays seeded self-play games and streams one JSONL row per game.
pub struct GameRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    setup: GameSetup,
    params: BotParams,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub analytics: AnalyticsSummary,
}

impl GameRunner {
    /// Build a runner from a validated configuration.
    pub fn new(
        config: BenchmarkConfig,
        outputs: ResolvedOutputs,
        params: BotParams,
    ) -> Result<Self, RunnerError> {
        let setup = config.table.to_setup();
        setup.validate()?;

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            setup,
            params: config.bot.apply(params),
            config,
            outputs,
        })
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    /// Execute every game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new();

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let outcome = self.play_game(game_index, game_seed)?;
            analytics.record_game(&outcome);
            write_game_row(&mut writer, &self.config, game_index, game_seed, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.config.run_id, &self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| telemetry_dir(&self.outputs).join("telemetry.jsonl"));

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
            analytics: summary,
        })
    }

    /// Plays one game from deal to defusal, explosion, stall or the turn limit.
    pub fn play_game(&self, game_index: usize, game_seed: u64) -> Result<GameOutcome, RunnerError> {
        let mut rng = StdRng::seed_from_u64(game_seed);
        let mut state = GameState::setup(&self.setup, &mut rng)?;
        let mut agents: Vec<Agent> = state
            .players()
            .iter()
            .map(|player| Agent::for_kind(player.kind, self.params))
            .collect();
        let mut metrics = DecisionMetrics::default();
        let mut tally = GameTally::default();

        for seat in 0..state.player_count() {
            let pick = {
                let ctx = PolicyContext::new(&state, seat)?;
                let start = Instant::now();
                let pick = agents[seat].decide_pick(&ctx, &mut rng);
                metrics.record(start.elapsed());
                pick
            };
            let Some(pick) = pick else {
                continue;
            };
            state.place_info_token(seat, pick.wire)?;
            tally.info_tokens += 1;

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "defuse_bench::pick",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u32,
                    seat = seat as u32,
                    wire = %pick.wire
                );
            }
        }
        state.begin_play();

        let mut turns = 0usize;
        while turns < self.config.games.max_turns && !state.status().is_over() {
            let seat = state.turn();
            let (decision, elapsed_ms) = {
                let ctx = PolicyContext::new(&state, seat)?;
                let start = Instant::now();
                let decision = match &mut agents[seat] {
                    Agent::Ai(policy) => policy
                        .decide_play(&ctx, &mut rng)
                        .map(|decision| (decision.play, decision.strategy.as_str())),
                    agent => agent
                        .decide_play_cards(&ctx, &mut rng)
                        .map(|play| (play, "external")),
                };
                (decision, metrics.record(start.elapsed()))
            };
            let Some((play, strategy)) = decision else {
                break;
            };

            *tally.strategies.entry(strategy.to_string()).or_default() += 1;
            if play.double_detector {
                tally.double_detector_uses += 1;
            }
            let result = state.apply_play(&play)?;
            tally.record(result);
            turns += 1;

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "defuse_bench::play",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u32,
                    turn = turns as u32,
                    seat = seat as u32,
                    play = %play,
                    strategy,
                    outcome = ?result,
                    dial = state.detonator_dial(),
                    elapsed_ms
                );
            }

            state.advance_turn();
        }

        Ok(GameOutcome {
            result: GameResult::from_status(state.status()),
            players: state.player_count(),
            turns,
            detonator_dial: state.detonator_dial(),
            detonator_limit: state.detonator_limit(),
            cuts: tally.cuts,
            misses: tally.misses,
            disposals: tally.disposals,
            red_hits: tally.red_hits,
            info_tokens: tally.info_tokens,
            double_detector_uses: tally.double_detector_uses,
            strategies: tally.strategies,
            metrics: metrics.finalize(),
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    game_index: usize,
    game_seed: u64,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{game_index:05}"),
        game_index,
        game_seed,
        players: outcome.players,
        result: outcome.result,
        turns: outcome.turns,
        detonator_dial: outcome.detonator_dial,
        detonator_limit: outcome.detonator_limit,
        cuts: outcome.cuts,
        misses: outcome.misses,
        disposals: outcome.disposals,
        red_hits: outcome.red_hits,
        info_tokens: outcome.info_tokens,
        double_detector_uses: outcome.double_detector_uses,
        strategies: outcome.strategies.clone(),
        speed_ms_turn: outcome.metrics.avg_ms_per_decision,
        decisions: outcome.metrics.decisions,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Defused,
    Exploded,
    /// No decision was available, or the turn limit was reached.
    Stalled,
}

impl GameResult {
    fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::Defused => GameResult::Defused,
            GameStatus::Exploded => GameResult::Exploded,
            GameStatus::InProgress => GameResult::Stalled,
        }
    }
}

#[derive(Default)]
struct GameTally {
    cuts: u32,
    misses: u32,
    disposals: u32,
    red_hits: u32,
    info_tokens: u32,
    double_detector_uses: u32,
    strategies: BTreeMap<String, u32>,
}

impl GameTally {
    fn record(&mut self, outcome: PlayOutcome) {
        match outcome {
            PlayOutcome::Disposed => self.disposals += 1,
            PlayOutcome::Cut { .. } => self.cuts += 1,
            PlayOutcome::Miss { .. } => self.misses += 1,
            PlayOutcome::Exploded => self.red_hits += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub result: GameResult,
    pub players: usize,
    pub turns: usize,
    pub detonator_dial: u8,
    pub detonator_limit: u8,
    pub cuts: u32,
    pub misses: u32,
    pub disposals: u32,
    pub red_hits: u32,
    pub info_tokens: u32,
    pub double_detector_uses: u32,
    pub strategies: BTreeMap<String, u32>,
    pub metrics: DecisionSummary,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    game_seed: u64,
    players: usize,
    result: GameResult,
    turns: usize,
    detonator_dial: u8,
    detonator_limit: u8,
    cuts: u32,
    misses: u32,
    disposals: u32,
    red_hits: u32,
    info_tokens: u32,
    double_detector_uses: u32,
    strategies: BTreeMap<String, u32>,
    speed_ms_turn: f64,
    decisions: u32,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid table: {0}")]
    Setup(#[from] SetupError),
    #[error("policy context unavailable: {0}")]
    Context(#[from] ContextError),
    #[error("game rejected a move: {0}")]
    Action(#[from] ActionError),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
