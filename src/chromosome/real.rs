use std::fmt;

use super::{write_genes, Chromosome, ChromosomeFactory};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A chromosome of real-valued genes bounded to `[lower, upper]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RealChromosomeData"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RealChromosome {
    genes: Vec<f64>,
    lower: f64,
    upper: f64,
    fitness: Option<f64>,
}

impl RealChromosome {
    /// Creates a real chromosome whose genes must be finite and lie in `[lower, upper]`.
    pub fn new(genes: Vec<f64>, lower: f64, upper: f64) -> Result<Self> {
        ensure_bounds(lower, upper)?;
        if let Some((index, gene)) = genes
            .iter()
            .enumerate()
            .find(|(_, &gene)| !in_bounds(gene, lower, upper))
        {
            return Err(GeneticError::InvalidGene(format!(
                "real gene at index {} must be in [{}, {}], got: {}",
                index, lower, upper, gene
            )));
        }
        Ok(Self {
            genes,
            lower,
            upper,
            fitness: None,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    /// Clamps `value` into this chromosome's bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// Product of all genes.
    pub fn product(&self) -> f64 {
        self.genes.iter().product()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RealChromosomeData {
    genes: Vec<f64>,
    lower: f64,
    upper: f64,
    fitness: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RealChromosomeData> for RealChromosome {
    type Error = GeneticError;

    fn try_from(data: RealChromosomeData) -> Result<Self> {
        let mut chromosome = Self::new(data.genes, data.lower, data.upper)?;
        chromosome.fitness = data.fitness;
        Ok(chromosome)
    }
}

fn in_bounds(value: f64, lower: f64, upper: f64) -> bool {
    value.is_finite() && value >= lower && value <= upper
}

fn ensure_bounds(lower: f64, upper: f64) -> Result<()> {
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(GeneticError::InvalidArgument(format!(
            "real bounds must be finite with lower < upper, got: [{}, {}]",
            lower, upper
        )));
    }
    Ok(())
}

impl Chromosome for RealChromosome {
    type Gene = f64;

    fn genes(&self) -> &[f64] {
        &self.genes
    }

    fn set_gene(&mut self, index: usize, value: f64) -> Result<()> {
        if !in_bounds(value, self.lower, self.upper) {
            return Err(GeneticError::InvalidGene(format!(
                "real gene must be in [{}, {}], got: {}",
                self.lower, self.upper, value
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

impl fmt::Display for RealChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RealChromosome")?;
        write_genes(f, &self.genes)
    }
}

/// Factory for [`RealChromosome`] with genes drawn from `[lower, upper]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RealBounds"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealChromosomeFactory {
    lower: f64,
    upper: f64,
}

impl RealChromosomeFactory {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        ensure_bounds(lower, upper)?;
        Ok(Self { lower, upper })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RealBounds {
    lower: f64,
    upper: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RealBounds> for RealChromosomeFactory {
    type Error = GeneticError;

    fn try_from(bounds: RealBounds) -> Result<Self> {
        Self::new(bounds.lower, bounds.upper)
    }
}

impl ChromosomeFactory<RealChromosome> for RealChromosomeFactory {
    fn create(&self, genes: Vec<f64>) -> Result<RealChromosome> {
        RealChromosome::new(genes, self.lower, self.upper)
    }

    fn random(&self, gene_length: usize, rng: &mut RandomNumberGenerator) -> Result<RealChromosome> {
        let genes = (0..gene_length)
            .map(|_| rng.gen_range(self.lower..=self.upper))
            .collect();
        Ok(RealChromosome {
            genes,
            lower: self.lower,
            upper: self.upper,
            fitness: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_enforced() {
        assert!(RealChromosome::new(vec![0.0, 0.5, 1.0], 0.0, 1.0).is_ok());
        assert!(RealChromosome::new(vec![1.5], 0.0, 1.0).is_err());
        assert!(RealChromosome::new(vec![f64::NAN], 0.0, 1.0).is_err());
        assert!(RealChromosome::new(vec![0.5], 1.0, 1.0).is_err());
        assert!(RealChromosomeFactory::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_clamp_and_product() {
        let chromosome = RealChromosome::new(vec![2.0, 3.0, 0.5], 0.0, 10.0).unwrap();
        assert_eq!(chromosome.clamp(12.0), 10.0);
        assert_eq!(chromosome.clamp(-1.0), 0.0);
        assert!((chromosome.product() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_gene_rejects_out_of_bounds() {
        let mut chromosome = RealChromosome::new(vec![0.1, 0.2], -1.0, 1.0).unwrap();
        assert!(chromosome.set_gene(0, 1.1).is_err());
        assert!(chromosome.set_gene(0, f64::INFINITY).is_err());
        chromosome.set_gene(1, -0.75).unwrap();
        assert_eq!(chromosome.genes(), &[0.1, -0.75]);
    }

    #[test]
    fn test_factory_random_within_bounds() {
        let factory = RealChromosomeFactory::new(-1.0, 1.0).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(8);
        let population = factory.create_population(25, 6, &mut rng).unwrap();

        assert_eq!(population.len(), 25);
        for chromosome in &population {
            assert_eq!(chromosome.len(), 6);
            assert!(chromosome.genes().iter().all(|g| (-1.0..=1.0).contains(g)));
        }
    }
}
