//! Upper-tail hypergeometric probabilities on log-factorials.
//!
//! Binomial coefficients for realistic universe sizes (tens of thousands of
//! proteins) overflow integers immediately, so all terms are assembled in
//! log space from a precomputed ln(k!) table and exponentiated per term.

/// Table of ln(k!) for 0..=n
#[derive(Debug)]
pub struct LnFactorial {
    table: Vec<f64>,
}

impl LnFactorial {
    /// Build the table up to and including `n`
    #[must_use]
    pub fn up_to(n: usize) -> Self {
        let mut table = Vec::with_capacity(n + 1);
        let mut acc = 0.0_f64;
        table.push(0.0);
        for k in 1..=n {
            acc += (k as f64).ln();
            table.push(acc);
        }
        Self { table }
    }

    #[must_use]
    pub fn get(&self, k: usize) -> f64 {
        self.table[k]
    }

    /// ln C(n, k); `None` when k > n (the coefficient is zero)
    #[must_use]
    pub fn ln_choose(&self, n: usize, k: usize) -> Option<f64> {
        if k > n {
            return None;
        }
        Some(self.get(n) - self.get(k) - self.get(n - k))
    }
}

/// One-sided upper-tail survival probability of the hypergeometric
/// distribution: the chance of observing at least `observed` successes when
/// drawing `sample` entities without replacement from a population of
/// `population` containing `successes` marked entities.
///
/// `P(X >= k) = sum_{i=k}^{min(K,n)} C(K,i) C(N-K, n-i) / C(N,n)`
///
/// Degenerate inputs resolve to fixed values instead of dividing by zero:
/// an empty population or sample gives 1.0 (no evidence of enrichment), as
/// does `successes == 0`.
#[must_use]
pub fn survival(population: usize, successes: usize, sample: usize, observed: usize) -> f64 {
    if population == 0 || sample == 0 || successes == 0 {
        return 1.0;
    }
    if observed == 0 {
        return 1.0;
    }
    // More marked entities than the population holds: malformed counts
    // upstream, same fallback as an oversized sample below
    if successes > population {
        return 1.0;
    }
    let upper = successes.min(sample);
    if observed > upper {
        return 0.0;
    }

    let ln_fact = LnFactorial::up_to(population);
    let Some(ln_total) = ln_fact.ln_choose(population, sample) else {
        // sample larger than population: malformed counts upstream
        return 1.0;
    };

    let mut p = 0.0_f64;
    for i in observed..=upper {
        let (Some(a), Some(b)) = (
            ln_fact.ln_choose(successes, i),
            ln_fact.ln_choose(population - successes, sample - i),
        ) else {
            // Outside the distribution's support, term is zero
            continue;
        };
        p += (a + b - ln_total).exp();
    }

    p.clamp(0.0, 1.0)
}
