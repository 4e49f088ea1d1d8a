/// Returns the positions in `values` of one longest strictly increasing
/// subsequence, in ascending order.
///
/// Patience sorting with a binary search per element, O(n log n).
pub(crate) fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[k] is the position of the smallest value ending an increasing run
    // of length k + 1.
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for (position, &value) in values.iter().enumerate() {
        let length = tails.partition_point(|&tail| values[tail] < value);
        if length > 0 {
            predecessors[position] = Some(tails[length - 1]);
        }
        if length == tails.len() {
            tails.push(position);
        } else {
            tails[length] = position;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        result.push(position);
        cursor = predecessors[position];
    }
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::longest_increasing_subsequence;

    #[test]
    fn empty_input_yields_empty_subsequence() {
        assert!(longest_increasing_subsequence(&[]).is_empty());
    }

    #[test]
    fn sorted_input_is_its_own_subsequence() {
        assert_eq!(longest_increasing_subsequence(&[0, 1, 2, 3]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn reversed_input_keeps_a_single_element() {
        assert_eq!(longest_increasing_subsequence(&[3, 2, 1, 0]).len(), 1);
    }

    #[test]
    fn picks_a_longest_run() {
        let values = [2, 0, 1, 5, 3, 4];
        let positions = longest_increasing_subsequence(&values);
        let picked: Vec<usize> = positions.iter().map(|&p| values[p]).collect();
        assert_eq!(picked, vec![0, 1, 3, 4]);
    }
}
