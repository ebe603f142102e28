/// Dot product of two equal-length slices.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Element-wise (Hadamard) product of two equal-length slices.
pub fn hadamard(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

/// Renders a vector as `[0.1234, -1.0000]` for state dumps.
pub fn format_vec(v: &[f64]) -> String {
    let items: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_hadamard() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(hadamard(&[1.0, 2.0], &[3.0, -1.0]), vec![3.0, -2.0]);
    }

    #[test]
    fn test_format_vec() {
        assert_eq!(format_vec(&[0.5, -1.0]), "[0.5000, -1.0000]");
        assert_eq!(format_vec(&[]), "[]");
    }
}
