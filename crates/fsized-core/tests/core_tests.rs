use fsized_core::{
    BUCKET_COUNT, ScanConfig, StatCounter, allocation, bucket_index, parse_block_size, size_range,
};

const SIZES: [u64; 12] = [
    0,
    1,
    2,
    511,
    512,
    4095,
    4096,
    4097,
    1 << 20,
    (1 << 30) + 7,
    1 << 40,
    u64::MAX / 4,
];

#[test]
fn test_totals_match_inputs() {
    let mut stats = StatCounter::new(4096);
    for &size in &SIZES {
        stats.add_file(size);
    }

    assert_eq!(stats.total_count(), SIZES.len() as u64);
    assert_eq!(stats.total_size(), SIZES.iter().sum::<u64>());

    let bucket_count: u64 = (0..BUCKET_COUNT).map(|i| stats.bucket(i).count).sum();
    assert_eq!(bucket_count + stats.overflow_count(), stats.total_count());

    let bucket_size: u64 = (0..BUCKET_COUNT).map(|i| stats.bucket(i).size).sum();
    assert_eq!(bucket_size + stats.overflow_size(), stats.total_size());

    assert_eq!(stats.overflow_count(), 2);
}

#[test]
fn test_empty_buckets_are_all_zero() {
    let mut stats = StatCounter::new(4096);
    for &size in &SIZES {
        stats.add_file(size);
    }

    for i in 0..BUCKET_COUNT {
        let b = stats.bucket(i);
        if b.count == 0 {
            assert_eq!((b.size, b.blocks, b.overhead), (0, 0, 0), "bucket {i}");
        }
    }
}

#[test]
fn test_max_bucket_is_highest_populated() {
    let mut stats = StatCounter::new(4096);
    for &size in &SIZES {
        stats.add_file(size);
    }

    let highest = (0..BUCKET_COUNT)
        .rev()
        .find(|&i| stats.bucket(i).count > 0)
        .unwrap();
    assert_eq!(stats.max_bucket(), highest);
    assert_eq!(highest, 30);
}

#[test]
fn test_block_totals_match_allocation_model() {
    let block_size = parse_block_size("4k").unwrap();
    let mut stats = StatCounter::new(block_size);
    let mut blocks = 0;
    let mut overhead = 0;

    for &size in &SIZES[..9] {
        stats.add_file(size);
        let a = allocation(size, block_size);
        blocks += a.blocks;
        overhead += a.overhead;
    }

    assert_eq!(stats.total_blocks(), blocks);
    assert_eq!(stats.total_overhead(), overhead);
}

#[test]
fn test_exact_block_file_scenario() {
    let config = ScanConfig::new("/unused");
    let mut stats = StatCounter::new(config.block_size);
    stats.add_file(0);
    stats.add_file(4096);
    stats.add_file(5000);

    assert_eq!(stats.total_count(), 3);

    let exact = stats.bucket(bucket_index(4096));
    assert_eq!(exact.count, 2);
    assert_eq!(exact.blocks, 4);
    assert_eq!(exact.overhead, 4096 + 3192);

    let empty = stats.bucket(0);
    assert_eq!(empty.count, 1);
    assert_eq!(empty.blocks, 0);
    assert_eq!(empty.overhead, 0);
}

#[test]
fn test_every_bucket_has_a_range() {
    for i in 0..BUCKET_COUNT {
        let range = size_range(i);
        assert!(range.contains(" - "), "{range}");
    }
}
