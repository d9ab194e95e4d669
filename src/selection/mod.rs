pub mod random;
pub mod rank;
pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

pub use random::RandomSelection;
pub use rank::{RankSelection, RankingMode};
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::SelectionStrategy;
pub use tournament::TournamentSelection;
