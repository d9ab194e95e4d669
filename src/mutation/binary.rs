use crate::chromosome::{BinaryChromosome, Chromosome};
use crate::error::{ensure_probability, GeneticError, Result};
use crate::mutation::MutationStrategy;
use crate::rng::RandomNumberGenerator;

/// Flips every bit independently with a fixed probability.
#[derive(Debug, Clone)]
pub struct BinaryMutation {
    probability: f64,
    rng: RandomNumberGenerator,
}

impl BinaryMutation {
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidArgument` if `probability` is outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: ensure_probability("Mutation probability", probability)?,
            rng: RandomNumberGenerator::new(),
        })
    }

    /// Uses the customary rate of one expected flip per chromosome, `1 / gene_length`.
    pub fn with_standard_rate(gene_length: usize) -> Result<Self> {
        if gene_length == 0 {
            return Err(GeneticError::InvalidArgument(
                "Gene length must be positive to derive a mutation rate".to_string(),
            ));
        }
        Self::new(1.0 / gene_length as f64)
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = rng;
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl MutationStrategy<BinaryChromosome> for BinaryMutation {
    fn mutate(&mut self, individual: &BinaryChromosome) -> Result<BinaryChromosome> {
        let mut mutant = individual.clone();
        for (index, &bit) in individual.genes().iter().enumerate() {
            if self.rng.chance(self.probability) {
                mutant.set_gene(index, 1 - bit)?;
            }
        }
        Ok(mutant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_one_flips_every_bit() {
        let chromosome = BinaryChromosome::new(vec![1, 0, 1, 1, 0]).unwrap();
        let mut mutation = BinaryMutation::new(1.0).unwrap();

        let mutant = mutation.mutate(&chromosome).unwrap();
        assert_eq!(mutant.genes(), &[0, 1, 0, 0, 1]);
        assert_eq!(chromosome.genes(), &[1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_probability_zero_is_identity() {
        let mut chromosome = BinaryChromosome::new(vec![1, 0, 1, 1, 0]).unwrap();
        chromosome.set_fitness(3.0);
        let mut mutation = BinaryMutation::new(0.0).unwrap();

        let mutant = mutation.mutate(&chromosome).unwrap();
        assert_eq!(mutant.genes(), chromosome.genes());
        assert_eq!(mutant.fitness(), Some(3.0));
    }

    #[test]
    fn test_flipped_chromosome_loses_fitness() {
        let mut chromosome = BinaryChromosome::new(vec![0, 0]).unwrap();
        chromosome.set_fitness(1.0);
        let mut mutation = BinaryMutation::new(1.0).unwrap();

        assert_eq!(mutation.mutate(&chromosome).unwrap().fitness(), None);
    }

    #[test]
    fn test_standard_rate() {
        let mutation = BinaryMutation::with_standard_rate(8).unwrap();
        assert_eq!(mutation.probability(), 0.125);
        assert!(BinaryMutation::with_standard_rate(0).is_err());
        assert!(BinaryMutation::new(1.1).is_err());
    }

    #[test]
    fn test_flip_frequency() {
        let chromosome = BinaryChromosome::new(vec![0; 1000]).unwrap();
        let mut mutation = BinaryMutation::new(0.1)
            .unwrap()
            .with_rng(RandomNumberGenerator::from_seed(99));

        let flipped = mutation.mutate(&chromosome).unwrap().count_ones();
        assert!((60..140).contains(&flipped), "flipped {}", flipped);
    }
}
