//! Which canonical-form slot each voice occupies

use crate::modular::pc;

/// Map each voice (by its pitch class) to a slot of the canonical form.
///
/// The form is first transposed, then (failing that) inverted and transposed,
/// until every slot lands on a pitch class of the chord. Duplicated pitch
/// classes take successive matching slots. Returns `None` when no placement
/// fits.
pub fn chord_element_names(pcs: &[i32], form: &[i32], modulus: i32) -> Option<Vec<usize>> {
    let fits = |working: &Vec<i32>| working.iter().all(|x| pcs.contains(x));

    let working = (0..modulus)
        .map(|t| form.iter().map(|&x| pc(x + t, modulus)).collect::<Vec<i32>>())
        .find(|w| fits(w))
        .or_else(|| {
            (0..modulus)
                .map(|t| form.iter().map(|&x| pc(t - x, modulus)).collect::<Vec<i32>>())
                .find(|w| fits(w))
        })?;

    let mut slots: Vec<Option<i32>> = working.into_iter().map(Some).collect();
    let mut names = Vec::with_capacity(pcs.len());
    for &p in pcs {
        let slot = slots.iter().position(|s| *s == Some(p))?;
        names.push(slot);
        slots[slot] = None;
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_triad_names() {
        // form [0, 3, 8] sits on E: E=0, G=1, C=2
        assert_eq!(chord_element_names(&[0, 4, 7], &[0, 3, 8], 12), Some(vec![2, 0, 1]));
        assert_eq!(chord_element_names(&[7, 4, 0], &[0, 3, 8], 12), Some(vec![1, 0, 2]));
    }

    #[test]
    fn test_inverted_placement() {
        // minor-triad form only fits a major triad upside down
        assert_eq!(chord_element_names(&[0, 4, 7], &[0, 3, 7], 12), Some(vec![2, 1, 0]));
    }

    #[test]
    fn test_duplicates_take_successive_slots() {
        assert_eq!(chord_element_names(&[0, 0, 4], &[0, 0, 4], 12), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_unplaceable_form() {
        assert_eq!(chord_element_names(&[0, 1, 2], &[0, 4, 8], 12), None);
    }
}
