//! Ordered container of individuals.

use std::fmt;
use std::ops::{Index, Range};

use super::{Container, Gene, Individual};

/// An ordered, owning collection of [`Individual`]s.
///
/// Insertion order is significant: callbacks use it to track
/// per-generation history, and all slicing and replacement operations
/// preserve the relative order of untouched elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G: Gene> {
    individuals: Vec<Individual<G>>,
}

impl<G: Gene> Population<G> {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    /// Returns the number of individuals.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Appends a single individual.
    pub fn push(&mut self, individual: Individual<G>) {
        self.individuals.push(individual);
    }

    /// Appends all individuals of `other`, preserving their order.
    pub fn integrate(&mut self, other: Self) {
        self.individuals.extend(other.individuals);
    }

    /// Replaces the individual at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, individual: Individual<G>) {
        self.individuals[index] = individual;
    }

    /// Returns a new population holding clones of the individuals at
    /// `indices`, in the order the indices are given.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            individuals: indices.iter().map(|&i| self.individuals[i].clone()).collect(),
        }
    }

    /// Returns a new population holding clones of the individuals in
    /// `range`, clamped to the population size.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.individuals.len());
        Self {
            individuals: self.individuals[range.start.min(end)..end].to_vec(),
        }
    }

    /// Iterates over the individuals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    /// Iterates mutably over the individuals in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual<G>> {
        self.individuals.iter_mut()
    }

    /// Returns the fitness of all individuals, in population order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals.iter().map(Individual::fitness).collect()
    }

    /// Returns the mean fitness of the population.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn mean_fitness(&self) -> f64 {
        assert!(
            !self.individuals.is_empty(),
            "cannot take the mean fitness of an empty population"
        );
        let total: f64 = self.individuals.iter().map(Individual::fitness).sum();
        total / self.individuals.len() as f64
    }

    /// Returns the individual with the highest fitness, or `None` for
    /// an empty population. Ties go to the first-encountered maximum.
    pub fn best(&self) -> Option<&Individual<G>> {
        // max_by keeps the later of two equal elements; mapping Equal to
        // Greater keeps the earlier one instead.
        self.individuals.iter().max_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(std::cmp::Ordering::Greater)
        })
    }

    /// Returns the individual with the lowest fitness, or `None` for an
    /// empty population. Ties go to the first-encountered minimum.
    pub fn worst(&self) -> Option<&Individual<G>> {
        self.individuals
            .iter()
            .min_by(|a, b| a.fitness().partial_cmp(&b.fitness()).unwrap_or(std::cmp::Ordering::Equal))
    }
}

impl<G: Gene> Default for Population<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gene> From<Vec<Individual<G>>> for Population<G> {
    fn from(individuals: Vec<Individual<G>>) -> Self {
        Self { individuals }
    }
}

impl<G: Gene> FromIterator<Individual<G>> for Population<G> {
    fn from_iter<I: IntoIterator<Item = Individual<G>>>(iter: I) -> Self {
        Self {
            individuals: iter.into_iter().collect(),
        }
    }
}

impl<G: Gene> Index<usize> for Population<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Individual<G> {
        &self.individuals[index]
    }
}

impl<'a, G: Gene> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

impl<G: Gene> Container for Population<G> {
    type Member = Individual<G>;

    fn empty() -> Self {
        Self::new()
    }

    fn size(&self) -> usize {
        self.size()
    }

    fn member(&self, index: usize) -> &Individual<G> {
        &self[index]
    }

    fn replace(&mut self, index: usize, member: Individual<G>) {
        self.replace(index, member);
    }

    fn push(&mut self, member: Individual<G>) {
        self.push(member);
    }

    fn integrate(&mut self, other: Self) {
        self.integrate(other);
    }

    fn subset(&self, indices: &[usize]) -> Self {
        self.subset(indices)
    }
}

impl<G: Gene> fmt::Display for Population<G> {
    /// Multi-line summary listing up to four individuals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_LINES: usize = 4;
        writeln!(f, "Population ({} individuals)", self.size())?;
        if self.size() <= MAX_LINES {
            for ind in self.iter() {
                writeln!(f, "  + {ind}")?;
            }
        } else {
            for ind in self.iter().take(MAX_LINES / 2) {
                writeln!(f, "  + {ind}")?;
            }
            writeln!(f, "   ...")?;
            for ind in self.iter().skip(self.size() - MAX_LINES / 2) {
                writeln!(f, "  + {ind}")?;
            }
        }
        Ok(())
    }
}
