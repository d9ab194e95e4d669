use std::fmt;

use super::{Chromosome, ChromosomeFactory};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A chromosome whose genes are bits stored as `0` or `1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BinaryChromosomeData"))]
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryChromosome {
    genes: Vec<u8>,
    fitness: Option<f64>,
}

impl BinaryChromosome {
    /// Creates a binary chromosome, rejecting any gene other than `0` or `1`.
    pub fn new(genes: Vec<u8>) -> Result<Self> {
        if let Some((index, bit)) = genes.iter().enumerate().find(|(_, &bit)| bit > 1) {
            return Err(GeneticError::InvalidGene(format!(
                "binary gene at index {} must be 0 or 1, got: {}",
                index, bit
            )));
        }
        Ok(Self {
            genes,
            fitness: None,
        })
    }

    /// Creates a chromosome of `length` uniformly random bits.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let genes = (0..length).map(|_| u8::from(rng.chance(0.5))).collect();
        Self {
            genes,
            fitness: None,
        }
    }

    /// Interprets the bits as a big-endian unsigned integer.
    ///
    /// Returns `None` if the value does not fit in 64 bits.
    pub fn decimal_value(&self) -> Option<u64> {
        self.genes.iter().try_fold(0u64, |acc, &bit| {
            acc.checked_mul(2).map(|shifted| shifted | u64::from(bit))
        })
    }

    /// Counts the bits set to one.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&bit| bit == 1).count()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BinaryChromosomeData {
    genes: Vec<u8>,
    fitness: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<BinaryChromosomeData> for BinaryChromosome {
    type Error = GeneticError;

    fn try_from(data: BinaryChromosomeData) -> Result<Self> {
        let mut chromosome = Self::new(data.genes)?;
        chromosome.fitness = data.fitness;
        Ok(chromosome)
    }
}

impl Chromosome for BinaryChromosome {
    type Gene = u8;

    fn genes(&self) -> &[u8] {
        &self.genes
    }

    fn set_gene(&mut self, index: usize, value: u8) -> Result<()> {
        if value > 1 {
            return Err(GeneticError::InvalidGene(format!(
                "binary gene must be 0 or 1, got: {}",
                value
            )));
        }
        let len = self.genes.len();
        let gene = self.genes.get_mut(index).ok_or_else(|| {
            GeneticError::InvalidArgument(format!(
                "gene index {} out of range for length {}",
                index, len
            ))
        })?;
        *gene = value;
        self.fitness = None;
        Ok(())
    }

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

impl fmt::Display for BinaryChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryChromosome[")?;
        for bit in &self.genes {
            write!(f, "{}", bit)?;
        }
        write!(f, "]")
    }
}

/// Factory for [`BinaryChromosome`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryChromosomeFactory;

impl BinaryChromosomeFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ChromosomeFactory<BinaryChromosome> for BinaryChromosomeFactory {
    fn create(&self, genes: Vec<u8>) -> Result<BinaryChromosome> {
        BinaryChromosome::new(genes)
    }

    fn random(&self, gene_length: usize, rng: &mut RandomNumberGenerator) -> Result<BinaryChromosome> {
        Ok(BinaryChromosome::random(gene_length, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_binary_genes() {
        assert!(BinaryChromosome::new(vec![0, 1, 1, 0]).is_ok());
        match BinaryChromosome::new(vec![0, 1, 2]) {
            Err(GeneticError::InvalidGene(msg)) => assert!(msg.contains("index 2")),
            other => panic!("Expected InvalidGene error, got {:?}", other),
        }
    }

    #[test]
    fn test_to_vec_is_a_copy() {
        let chromosome = BinaryChromosome::new(vec![1, 0, 1]).unwrap();
        let mut copy = chromosome.to_vec();
        copy[0] = 0;
        assert_eq!(chromosome.genes(), &[1, 0, 1]);
    }

    #[test]
    fn test_set_gene_clears_fitness() {
        let mut chromosome = BinaryChromosome::new(vec![1, 0, 1]).unwrap();
        chromosome.set_fitness(3.0);
        chromosome.set_gene(1, 1).unwrap();
        assert_eq!(chromosome.genes(), &[1, 1, 1]);
        assert_eq!(chromosome.fitness(), None);
        assert_eq!(chromosome.score(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_set_gene_validation() {
        let mut chromosome = BinaryChromosome::new(vec![1, 0]).unwrap();
        assert!(chromosome.set_gene(0, 3).is_err());
        assert!(chromosome.set_gene(5, 1).is_err());
        assert_eq!(chromosome.genes(), &[1, 0]);
    }

    #[test]
    fn test_decimal_value() {
        let chromosome = BinaryChromosome::new(vec![1, 0, 1, 1]).unwrap();
        assert_eq!(chromosome.decimal_value(), Some(11));
        assert_eq!(chromosome.count_ones(), 3);

        let empty = BinaryChromosome::new(Vec::new()).unwrap();
        assert_eq!(empty.decimal_value(), Some(0));

        let too_long = BinaryChromosome::new(vec![1; 65]).unwrap();
        assert_eq!(too_long.decimal_value(), None);
    }

    #[test]
    fn test_factory_population() {
        let factory = BinaryChromosomeFactory::new();
        let mut rng = RandomNumberGenerator::from_seed(11);
        let population = factory.create_population(20, 8, &mut rng).unwrap();

        assert_eq!(population.len(), 20);
        for chromosome in &population {
            assert_eq!(chromosome.len(), 8);
            assert!(chromosome.genes().iter().all(|&bit| bit <= 1));
            assert_eq!(chromosome.fitness(), None);
        }
    }

    #[test]
    fn test_display() {
        let chromosome = BinaryChromosome::new(vec![1, 0, 1, 1, 0]).unwrap();
        assert_eq!(chromosome.to_string(), "BinaryChromosome[10110]");
    }
}
