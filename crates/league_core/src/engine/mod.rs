//! League simulation engine.
//!
//! - [`fixtures`]: double round-robin schedule generation
//! - [`simulator`]: strength-weighted match scores
//! - [`standings`]: points table apply/reverse and ranking
//! - [`orchestrator`]: the week-advancement state machine
//! - [`predictor`]: Monte Carlo championship odds

pub mod fixtures;
pub mod orchestrator;
pub mod predictor;
pub mod simulator;
pub mod standings;


pub use fixtures::{generate_fixtures, schedule_season, season_weeks};
pub use orchestrator::{LeagueService, SeasonOutcome, WeekOutcome};
pub use predictor::ChampionshipPredictor;
pub use simulator::{MatchOutcome, MatchSimulator};
pub use standings::{apply_result, rank, ranked, reverse_result};
