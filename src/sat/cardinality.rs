//! Exactly-k cardinality constraints via a totalizer encoding
//!
//! The totalizer sums the input literals pairwise up a balanced tree. Every
//! tree node exposes unary counter outputs `o[1..=m]` where `o[i]` holds iff at
//! least `i` of the leaves below it are true. Both directions of the sum are
//! encoded, so pinning the root counter gives exact equality.

use super::constraints::Clause;
use super::VariableManager;
use crate::error::{encoding_bail, Result};

/// Clauses forcing exactly `k` of `literals` to be true.
///
/// A literal listed twice contributes twice. `k` larger than the
/// number of literals is an encoder bug and reported as such.
pub fn exactly_k(literals: &[i32], k: usize, variables: &mut VariableManager) -> Result<Vec<Clause>> {
    if k > literals.len() {
        encoding_bail!(
            "cardinality target {} exceeds the {} literals available",
            k,
            literals.len()
        );
    }

    let mut clauses = Vec::new();
    if literals.is_empty() {
        return Ok(clauses);
    }

    let counter = build_totalizer(literals, variables, &mut clauses)?;

    // at least k
    if k > 0 {
        clauses.push(Clause::unit(counter[k - 1]));
    }
    // at most k
    if k < counter.len() {
        clauses.push(Clause::unit(-counter[k]));
    }

    Ok(clauses)
}

/// Build the totalizer tree and return the unary outputs of its root.
///
/// `outputs[i]` means "at least `i + 1` inputs are true".
fn build_totalizer(
    literals: &[i32],
    variables: &mut VariableManager,
    clauses: &mut Vec<Clause>,
) -> Result<Vec<i32>> {
    if literals.len() == 1 {
        return Ok(vec![literals[0]]);
    }

    let (left, right) = literals.split_at(literals.len() / 2);
    let left = build_totalizer(left, variables, clauses)?;
    let right = build_totalizer(right, variables, clauses)?;

    let mut outputs = Vec::with_capacity(left.len() + right.len());
    for _ in 0..left.len() + right.len() {
        outputs.push(variables.fresh_auxiliary()?);
    }

    merge(&left, &right, &outputs, clauses);
    Ok(outputs)
}

/// Tie `outputs` to the sum of the `left` and `right` unary counters
fn merge(left: &[i32], right: &[i32], outputs: &[i32], clauses: &mut Vec<Clause>) {
    let (p, q) = (left.len(), right.len());

    for i in 0..=p {
        for j in 0..=q {
            // left >= i and right >= j  =>  total >= i + j
            if i + j > 0 {
                let mut literals = Vec::with_capacity(3);
                if i > 0 {
                    literals.push(-left[i - 1]);
                }
                if j > 0 {
                    literals.push(-right[j - 1]);
                }
                literals.push(outputs[i + j - 1]);
                clauses.push(Clause::new(literals));
            }

            // left < i + 1 and right < j + 1  =>  total < i + j + 1
            if i + j < p + q {
                let mut literals = Vec::with_capacity(3);
                if i < p {
                    literals.push(left[i]);
                }
                if j < q {
                    literals.push(right[j]);
                }
                literals.push(-outputs[i + j]);
                clauses.push(Clause::new(literals));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashiError;
    use itertools::Itertools;
    use proptest::prelude::*;

    /// Does some extension of `inputs` over the auxiliary variables satisfy `clauses`?
    fn extendable(clauses: &[Clause], inputs: &[i32], assignment: &[bool], total_vars: usize) -> bool {
        let aux: Vec<i32> = (1..=total_vars as i32).filter(|v| !inputs.contains(v)).collect();
        (0..1u64 << aux.len()).any(|mask| {
            let value = |var: i32| -> bool {
                if let Some(pos) = inputs.iter().position(|&v| v == var) {
                    assignment[pos]
                } else {
                    let pos = aux.iter().position(|&v| v == var).unwrap_or(0);
                    mask >> pos & 1 == 1
                }
            };
            clauses
                .iter()
                .all(|c| c.literals.iter().any(|&l| value(l.abs()) == (l > 0)))
        })
    }

    fn check_exactly(n: usize, k: usize) {
        let mut vm = VariableManager::new(0, 0);
        let inputs: Vec<i32> = (0..n).map(|_| vm.fresh_auxiliary().unwrap()).collect();
        let clauses = exactly_k(&inputs, k, &mut vm).unwrap();
        let total = vm.variable_count();

        for bits in (0..n).map(|_| [false, true]).multi_cartesian_product() {
            let count = bits.iter().filter(|&&b| b).count();
            assert_eq!(
                extendable(&clauses, &inputs, &bits, total),
                count == k,
                "n={} k={} bits={:?}",
                n,
                k,
                bits
            );
        }
    }

    #[test]
    fn test_exactly_k_small() {
        for n in 1..=4 {
            for k in 0..=n {
                check_exactly(n, k);
            }
        }
    }

    #[test]
    fn test_empty_literals() {
        let mut vm = VariableManager::new(0, 0);
        assert!(exactly_k(&[], 0, &mut vm).unwrap().is_empty());
        assert!(matches!(exactly_k(&[], 1, &mut vm), Err(HashiError::Encoding(_))));
    }

    #[test]
    fn test_target_out_of_range() {
        let mut vm = VariableManager::new(0, 0);
        let inputs = vec![vm.fresh_auxiliary().unwrap(), vm.fresh_auxiliary().unwrap()];
        assert!(exactly_k(&inputs, 3, &mut vm).is_err());
    }

    #[test]
    fn test_single_literal() {
        let mut vm = VariableManager::new(0, 0);
        let x = vm.fresh_auxiliary().unwrap();
        assert_eq!(exactly_k(&[x], 1, &mut vm).unwrap(), vec![Clause::unit(x)]);
        assert_eq!(exactly_k(&[x], 0, &mut vm).unwrap(), vec![Clause::unit(-x)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn exactly_k_matches_count(bits in proptest::collection::vec(any::<bool>(), 1..6), k in 0usize..6) {
            let n = bits.len();
            let k = k.min(n);
            let mut vm = VariableManager::new(0, 0);
            let inputs: Vec<i32> = (0..n).map(|_| vm.fresh_auxiliary().unwrap()).collect();
            let clauses = exactly_k(&inputs, k, &mut vm).unwrap();
            let total = vm.variable_count();
            let count = bits.iter().filter(|&&b| b).count();
            prop_assert_eq!(extendable(&clauses, &inputs, &bits, total), count == k);
        }
    }
}
