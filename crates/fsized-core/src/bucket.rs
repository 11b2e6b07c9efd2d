//! Logarithmic size buckets.
//!
//! A file of `n` bytes lands in bucket `i` when `2^i <= n < 2^(i+1)`.
//! Empty and single-byte files share bucket 0.

/// Number of buckets tracked individually. Bucket 39 tops out at 1 TiB.
pub const BUCKET_COUNT: usize = 40;

/// Classify a file size into its bucket index.
///
/// Returns `floor(log2(size))`, or 0 for sizes 0 and 1. The result may be
/// `>= BUCKET_COUNT` for very large files; callers treat those as overflow.
pub fn bucket_index(size: u64) -> usize {
    if size <= 1 {
        return 0;
    }
    (u64::BITS - 1 - size.leading_zeros()) as usize
}

/// Split `2^power` into a magnitude and a binary unit label.
fn unit_of(power: usize) -> (u64, &'static str) {
    match power {
        0..10 => (1 << power, "B"),
        10..20 => (1 << (power - 10), "kB"),
        20..30 => (1 << (power - 20), "MB"),
        _ => (1 << (power - 30), "GB"),
    }
}

/// Render a bucket as a human-readable byte range, e.g. `"512 MB - 1 GB"`.
pub fn size_range(index: usize) -> String {
    if index == 0 {
        return "0 - 1 B".to_string();
    }

    let (lo, lo_unit) = unit_of(index);
    let (hi, hi_unit) = unit_of(index + 1);

    if hi_unit == "B" {
        format!("{lo} - {} {hi_unit}", hi - 1)
    } else if lo_unit == hi_unit {
        format!("{lo} - {hi} {hi_unit}")
    } else {
        format!("{lo} {lo_unit} - {hi} {hi_unit}")
    }
}

/// Label for the aggregate bucket holding files of 1 TiB and more.
pub fn overflow_range() -> String {
    format!(">= {} GB", 1u64 << (BUCKET_COUNT - 30))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_index_literals() {
        let cases: [(u64, usize); 14] = [
            (0, 0),
            (1, 0),
            (2, 1),
            (3, 1),
            (7, 2),
            (14, 3),
            (30, 4),
            (33, 5),
            (70, 6),
            (202, 7),
            (511, 8),
            (513, 9),
            (1024, 10),
            (1025, 10),
        ];

        for (input, expected) in cases {
            assert_eq!(bucket_index(input), expected, "size {input}");
        }
    }

    #[test]
    fn test_bucket_index_powers_of_two() {
        for k in 1..64 {
            assert_eq!(bucket_index(1u64 << k), k);
            assert_eq!(bucket_index((1u64 << k) - 1), k - 1);
        }
        assert_eq!(bucket_index(u64::MAX), 63);
    }

    #[test]
    fn test_bucket_index_monotonic() {
        let mut prev = 0;
        for n in 0..10_000u64 {
            let b = bucket_index(n);
            assert!(b >= prev);
            prev = b;
        }
    }

    #[test]
    fn test_size_range_first_bucket() {
        assert_eq!(size_range(0), "0 - 1 B");
    }

    #[test]
    fn test_size_range_bytes_inclusive_upper() {
        assert_eq!(size_range(1), "2 - 3 B");
        assert_eq!(size_range(8), "256 - 511 B");
    }

    #[test]
    fn test_size_range_same_unit() {
        assert_eq!(size_range(10), "1 - 2 kB");
        assert_eq!(size_range(15), "32 - 64 kB");
        assert_eq!(size_range(39), "512 - 1024 GB");
    }

    #[test]
    fn test_size_range_crossing_units() {
        assert_eq!(size_range(9), "512 B - 1 kB");
        assert_eq!(size_range(19), "512 kB - 1 MB");
        assert_eq!(size_range(29), "512 MB - 1 GB");
    }

    #[test]
    fn test_overflow_range() {
        assert_eq!(overflow_range(), ">= 1024 GB");
    }
}
