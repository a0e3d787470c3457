//! Run-length encoding primitives shared by the compressed formats
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

/// Find the least common byte value in a buffer.
///
/// Ties break toward the smallest value (ascending scan, first minimum
/// wins). The result ends up in compressed output, so the scan order must
/// stay stable.
pub fn find_escape_byte(buf: &[u8]) -> u8 {
    let mut counts = [0u32; 256];
    for &val in buf {
        counts[val as usize] += 1;
    }

    let mut best = 0usize;
    for (val, &count) in counts.iter().enumerate() {
        if count < counts[best] {
            best = val;
        }
    }
    best as u8
}

/// Run-length encode `buf` into (value, count) pairs.
///
/// A run is flushed when it reaches `max_run`; if the next byte still
/// matches, a new run of the same value starts at count 1. The final run
/// is always flushed.
pub fn rle_encode(buf: &[u8], max_run: u16) -> Vec<(u8, u16)> {
    assert!(max_run <= 256);

    let mut runs = Vec::new();
    let mut iter = buf.iter();
    let Some(&first) = iter.next() else {
        return runs;
    };

    let mut prev = first;
    let mut count: u16 = 1;
    for &val in iter {
        if val == prev {
            if count == max_run {
                runs.push((prev, count));
                count = 1;
            } else {
                count += 1;
            }
        } else {
            runs.push((prev, count));
            prev = val;
            count = 1;
        }
    }
    runs.push((prev, count));

    runs
}
