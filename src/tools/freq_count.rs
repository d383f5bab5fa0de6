/// Returns a frequency count of the input data, one slot per byte value.
pub fn freqs(data: &[u8]) -> [u64; 256] {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Count of distinct byte values present in a frequency table.
pub fn distinct(freqs: &[u64; 256]) -> usize {
    freqs.iter().filter(|&&f| f > 0).count()
}

#[cfg(test)]
mod test {
    use super::{distinct, freqs};

    #[test]
    fn freqs_test() {
        let f = freqs(b"ABAB!");
        assert_eq!(f[b'A' as usize], 2);
        assert_eq!(f[b'B' as usize], 2);
        assert_eq!(f[b'!' as usize], 1);
        assert_eq!(f.iter().sum::<u64>(), 5);
        assert_eq!(distinct(&f), 3);
        assert_eq!(distinct(&freqs(&[])), 0);
    }
}
