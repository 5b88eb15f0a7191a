use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

use crate::errors::Result;
use crate::read::ConfidenceSequence;

/// Number of bases at each end of a read that get the low quality ramp
const TAIL_LENGTH: usize = 12;

/// Creates a read pair we can verify against, along with the template it was sampled from.
/// Each read covers most of the template, starting and ending at slightly different points.
/// Read confidences ramp up from a poor start, stay high in the middle, and fall off at the end.
/// Errors get a low confidence, mimicking what a base caller usually reports.
/// Read 2 is returned as sequenced, i.e. reverse complemented relative to the template.
/// # Arguments
/// * `seed` - seed for the random generator, the same seed always gives the same pair
/// * `seq_len` - the length of the template
/// * `error_rate` - overall error rate, assumes mismatch, insertion, and deletion are equally likely sub-components of this error rate
/// # Errors
/// * None so far, reads are always valid by construction
pub fn generate_read_pair(seed: u64, seq_len: usize, error_rate: f64) -> Result<(Vec<u8>, ConfidenceSequence, ConfidenceSequence)> {
    assert!((0.0..=1.0).contains(&error_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let base_distribution = Uniform::new(0, 4);
    let template: Vec<u8> = (0..seq_len)
        .map(|_i| b"ACGT"[rng.sample(base_distribution)])
        .collect();

    let max_trim = (seq_len / 10).max(1);
    let trim_distribution = Uniform::new(0, max_trim);
    let start1 = rng.sample(trim_distribution);
    let end1 = seq_len - rng.sample(trim_distribution);
    let start2 = rng.sample(trim_distribution);
    let end2 = seq_len - rng.sample(trim_distribution);

    let read1 = sample_read(&mut rng, &template[start1..end1], error_rate)?;
    let read2 = sample_read(&mut rng, &template[start2..end2], error_rate)?.reverse_complement();
    Ok((template, read1, read2))
}

/// Samples a single noisy read from a region of the template, forward orientation
fn sample_read<R: Rng>(rng: &mut R, region: &[u8], error_rate: f64) -> Result<ConfidenceSequence> {
    let base_distribution = Uniform::new(0, 4);
    let error_distribution = Uniform::new(0.0, 1.0);
    let error_type_distribution = Uniform::new(0, 3);
    let good_distribution = Uniform::new_inclusive(45, 62);
    let poor_distribution = Uniform::new_inclusive(5, 30);

    let mut bases = vec![];
    let mut is_error = vec![];
    let mut region_index = 0;
    while region_index < region.len() {
        let c = region[region_index];
        if rng.sample(error_distribution) < error_rate {
            match rng.sample(error_type_distribution) {
                0 => {
                    // substitution
                    let alt = b"ACGT".iter().cloned()
                        .filter(|&b| b != c)
                        .nth(rng.sample(Uniform::new(0, 3)))
                        .unwrap_or(b'N');
                    bases.push(alt);
                    is_error.push(true);
                    region_index += 1;
                },
                1 => {
                    // deletion
                    region_index += 1;
                },
                _ => {
                    // insertion
                    bases.push(b"ACGT"[rng.sample(base_distribution)]);
                    is_error.push(true);
                }
            };
        } else {
            bases.push(c);
            is_error.push(false);
            region_index += 1;
        }
    }

    let len = bases.len();
    let confidences: Vec<u8> = is_error.iter().enumerate()
        .map(|(i, &err)| {
            let in_tail = i < TAIL_LENGTH || i + TAIL_LENGTH >= len;
            if err || in_tail {
                rng.sample(poor_distribution)
            } else {
                rng.sample(good_distribution)
            }
        })
        .collect();

    ConfidenceSequence::new(bases, confidences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_deterministic() {
        let (t1, a1, b1) = generate_read_pair(7, 100, 0.05).unwrap();
        let (t2, a2, b2) = generate_read_pair(7, 100, 0.05).unwrap();
        assert_eq!(t1, t2);
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        assert_eq!(t1.len(), 100);
    }

    #[test]
    fn test_error_free_reads() {
        let (template, read1, read2) = generate_read_pair(3, 200, 0.0).unwrap();
        let forward2 = read2.reverse_complement();

        // no errors means each read is an exact substring of the template
        let contains = |needle: &[u8]| template.windows(needle.len()).any(|w| w == needle);
        assert!(contains(read1.bases()));
        assert!(contains(forward2.bases()));

        // tails are poor, the middle is good
        assert!(read1.confidences()[0] <= 30);
        assert!(read1.confidences()[read1.len() / 2] >= 45);
        assert!(read1.high_quality_segment(40).len() >= read1.len() - 2 * TAIL_LENGTH);
    }
}
