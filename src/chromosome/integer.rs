use std::fmt;

use super::{write_genes, Chromosome, ChromosomeFactory};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A chromosome of integer genes bounded to `[min, max]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "IntegerChromosomeData"))]
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerChromosome {
    genes: Vec<i64>,
    min: i64,
    max: i64,
    fitness: Option<f64>,
}

impl IntegerChromosome {
    /// Creates an integer chromosome whose genes must lie in `[min, max]`.
    pub fn new(genes: Vec<i64>, min: i64, max: i64) -> Result<Self> {
        ensure_bounds(min, max)?;
        if let Some((index, gene)) = genes
            .iter()
            .enumerate()
            .find(|(_, &gene)| gene < min || gene > max)
        {
            return Err(GeneticError::InvalidGene(format!(
                "integer gene at index {} must be in [{}, {}], got: {}",
                index, min, max, gene
            )));
        }
        Ok(Self {
            genes,
            min,
            max,
            fitness: None,
        })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Sum of all genes, widened so that no combination of `i64` genes can overflow.
    pub fn sum(&self) -> i128 {
        self.genes.iter().map(|&gene| i128::from(gene)).sum()
    }
}

impl Chromosome for IntegerChromosome {
    type Gene = i64;

    fn genes(&self) -> &[i64] {
        &self.genes
    }

    fn set_gene(&mut self, index: usize, value: i64) -> Result<()> {
        if value < self.min || value > self.max {
            return Err(GeneticError::InvalidGene(format!(
                "integer gene must be in [{}, {}], got: {}",
                self.min, self.max, value
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

impl fmt::Display for IntegerChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntegerChromosome")?;
        write_genes(f, &self.genes)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct IntegerChromosomeData {
    genes: Vec<i64>,
    min: i64,
    max: i64,
    fitness: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<IntegerChromosomeData> for IntegerChromosome {
    type Error = GeneticError;

    fn try_from(data: IntegerChromosomeData) -> Result<Self> {
        let mut chromosome = Self::new(data.genes, data.min, data.max)?;
        chromosome.fitness = data.fitness;
        Ok(chromosome)
    }
}

fn ensure_bounds(min: i64, max: i64) -> Result<()> {
    if min > max {
        return Err(GeneticError::InvalidArgument(format!(
            "integer bounds must satisfy min <= max, got: [{}, {}]",
            min, max
        )));
    }
    Ok(())
}

/// Factory for [`IntegerChromosome`] with genes drawn from `[min, max]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "IntegerBounds"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerChromosomeFactory {
    min: i64,
    max: i64,
}

impl IntegerChromosomeFactory {
    pub fn new(min: i64, max: i64) -> Result<Self> {
        ensure_bounds(min, max)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct IntegerBounds {
    min: i64,
    max: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<IntegerBounds> for IntegerChromosomeFactory {
    type Error = GeneticError;

    fn try_from(bounds: IntegerBounds) -> Result<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl ChromosomeFactory<IntegerChromosome> for IntegerChromosomeFactory {
    fn create(&self, genes: Vec<i64>) -> Result<IntegerChromosome> {
        IntegerChromosome::new(genes, self.min, self.max)
    }

    fn random(&self, gene_length: usize, rng: &mut RandomNumberGenerator) -> Result<IntegerChromosome> {
        let genes = (0..gene_length)
            .map(|_| rng.gen_range(self.min..=self.max))
            .collect();
        Ok(IntegerChromosome {
            genes,
            min: self.min,
            max: self.max,
            fitness: None,
        })
    }
}
