use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::replacement::ReplacementStrategy;

/// Replaces the whole population with its offspring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FullGenerationReplacement;

impl FullGenerationReplacement {
    pub fn new() -> Self {
        Self
    }
}

impl<C> ReplacementStrategy<C> for FullGenerationReplacement
where
    C: Chromosome,
{
    fn replace_population(&self, current: Vec<C>, offspring: Vec<C>) -> Result<Vec<C>> {
        if current.is_empty() {
            return Ok(Vec::new());
        }
        if offspring.is_empty() {
            return Ok(current);
        }
        if offspring.len() != current.len() {
            return Err(GeneticError::InvalidArgument(format!(
                "Full generation replacement needs as many offspring as individuals: {} != {}",
                offspring.len(),
                current.len()
            )));
        }
        Ok(offspring)
    }
}
