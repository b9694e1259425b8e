use std::{
    fmt,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use rand::{
    distributions::uniform::{SampleBorrow, SampleUniform, UniformInt, UniformSampler},
    Rng,
};

use serde::Serialize;

/// The cost of travelling along an edge, or of a (partial) tour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cost(usize);

impl Cost {
    pub fn new(cost: usize) -> Self {
        Cost(cost)
    }

    pub fn zero() -> Self {
        Cost(0)
    }

    pub fn value(&self) -> usize {
        self.0
    }

    pub fn checked_mul(self, factor: usize) -> Option<Self> {
        self.0.checked_mul(factor).map(Cost)
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Cost) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl Sum<Cost> for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + *b)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = Cost(self.0 + rhs.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward the formatter so width and alignment flags apply to the number.
        Display::fmt(&self.0, f)
    }
}

impl From<usize> for Cost {
    fn from(cost: usize) -> Self {
        Cost::new(cost)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct UniformCost(UniformInt<usize>);

impl UniformSampler for UniformCost {
    type X = Cost;
    fn new<B1, B2>(low: B1, high: B2) -> Self
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        UniformCost(UniformInt::<usize>::new(low.borrow().0, high.borrow().0))
    }
    fn new_inclusive<B1, B2>(low: B1, high: B2) -> Self
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        UniformCost(UniformInt::<usize>::new_inclusive(
            low.borrow().0,
            high.borrow().0,
        ))
    }
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::X {
        Cost::new(self.0.sample(rng))
    }
}

impl SampleUniform for Cost {
    type Sampler = UniformCost;
}
