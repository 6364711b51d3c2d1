//! Permutations in cycle notation
//!
//! Cycles are lists of 0-based positions; the element at each position moves
//! to the next position of its cycle. The string form is 1-based with one
//! digit per position, e.g. `(12)(3)`.

use anyhow::{Result, anyhow};

pub type Cycle = Vec<usize>;

/// Cycles that rearrange `first` into `second`.
///
/// Returns `None` when some element of `first` cannot be found in `second`.
/// Repeated elements are matched to their first occurrence.
pub fn identify_permutation<T: PartialEq>(first: &[T], second: &[T]) -> Option<Vec<Cycle>> {
    let mut cycles = Vec::new();
    let mut found: Vec<&T> = Vec::new();

    for (start, item) in first.iter().enumerate() {
        if found.contains(&item) {
            continue;
        }
        let mut index = start;
        let mut item = item;
        let mut current: Cycle = Vec::new();
        loop {
            let target = second.iter().position(|x| x == item)?;
            current.push(index);
            found.push(item);
            if current.contains(&target) {
                cycles.push(current);
                break;
            }
            item = first.get(target)?;
            index = target;
        }
    }

    Some(cycles)
}

/// Render cycles 1-based, e.g. `[[0, 1], [2]]` as `(12)(3)`
pub fn cycles_to_string(cycles: &[Cycle]) -> String {
    let inner: Vec<String> = cycles
        .iter()
        .map(|c| c.iter().map(|i| (i + 1).to_string()).collect())
        .collect();
    format!("({})", inner.join(")("))
}

/// Parse `(12)(36)(45)` into 0-based cycles
pub fn parse_cycles(s: &str) -> Result<Vec<Cycle>> {
    let mut cycles = Vec::new();
    for group in s.split(')') {
        let digits = group.trim().trim_start_matches('(');
        if digits.is_empty() {
            continue;
        }
        let cycle = digits
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if d > 0 => Ok(d as usize - 1),
                _ => Err(anyhow!("Invalid position '{}' in cycle '{}'", c, group)),
            })
            .collect::<Result<Cycle>>()?;
        cycles.push(cycle);
    }
    Ok(cycles)
}

/// Apply cycles to a slice
pub fn permute<T: Clone>(cycles: &[Cycle], items: &[T]) -> Result<Vec<T>> {
    let mut out = items.to_vec();
    for cycle in cycles {
        for (i, &position) in cycle.iter().enumerate() {
            let next = cycle[(i + 1) % cycle.len()];
            let item = items
                .get(position)
                .ok_or_else(|| anyhow!("Cycle position {} is out of range", position + 1))?;
            let slot = out
                .get_mut(next)
                .ok_or_else(|| anyhow!("Cycle position {} is out of range", next + 1))?;
            *slot = item.clone();
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_swap() {
        let cycles = identify_permutation(&["a", "b", "c"], &["b", "a", "c"]).unwrap();
        assert_eq!(cycles, vec![vec![0, 1], vec![2]]);
        assert_eq!(cycles_to_string(&cycles), "(12)(3)");
    }

    #[test]
    fn test_identify_three_cycle() {
        let cycles = identify_permutation(&[60, 64, 67], &[64, 67, 60]).unwrap();
        assert_eq!(cycles_to_string(&cycles), "(132)");
        assert_eq!(permute(&cycles, &[60, 64, 67]).unwrap(), vec![64, 67, 60]);
    }

    #[test]
    fn test_missing_element() {
        assert_eq!(identify_permutation(&[1, 2], &[1, 3]), None);
    }

    #[test]
    fn test_parse_and_permute() {
        let cycles = parse_cycles("(12)(36)(45)").unwrap();
        assert_eq!(cycles, vec![vec![0, 1], vec![2, 5], vec![3, 4]]);
        let out = permute(&cycles, &["C", "c", "E", "gs", "Af", "e"]).unwrap();
        assert_eq!(out, vec!["c", "C", "e", "Af", "gs", "E"]);
    }

    #[test]
    fn test_parse_rejects_bad_positions() {
        assert!(parse_cycles("(10)").is_err());
        assert!(parse_cycles("(1x)").is_err());
        assert!(permute(&parse_cycles("(19)").unwrap(), &[1, 2]).is_err());
    }
}
