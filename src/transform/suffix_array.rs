//! Suffix-array construction by prefix doubling.
//!
//! Each round sorts the suffix indices by the rank pair `(rank[i], rank[i+k])`
//! and then relabels the ranks, doubling `k` until every suffix has a distinct
//! rank. Both sort passes are stable counting sorts, so a round costs O(n) and
//! the whole build is O(n log n). Suffixes running past the end of the block
//! get a sentinel second key that orders before every real rank.

/// Builds suffix arrays. The scratch vectors are kept between calls so a
/// worker thread can reuse one builder for every block it transforms.
pub struct SuffixArrayBuilder {
    rank: Vec<usize>,
    scratch: Vec<usize>,
    counts: Vec<usize>,
}

impl SuffixArrayBuilder {
    pub fn new() -> Self {
        Self {
            rank: Vec::new(),
            scratch: Vec::new(),
            counts: Vec::new(),
        }
    }

    /// Build the suffix array of `s`: a permutation of `0..n` such that the
    /// suffix starting at `sa[i]` sorts at or before the suffix starting at
    /// `sa[i + 1]`.
    pub fn build(&mut self, s: &[u8]) -> Vec<usize> {
        let n = s.len();
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![0];
        }

        // Round zero: sort positions by their byte value, then collapse the
        // byte values into dense rank labels 0..n so later counting passes
        // can size their buckets by n alone.
        self.scratch.clear();
        self.scratch.resize(n, 0);

        let mut sa = vec![0_usize; n];
        self.counts.clear();
        self.counts.resize(256, 0);
        for &b in s {
            self.counts[b as usize] += 1;
        }
        to_bucket_starts(&mut self.counts);
        for (i, &b) in s.iter().enumerate() {
            sa[self.counts[b as usize]] = i;
            self.counts[b as usize] += 1;
        }

        self.rank.clear();
        self.rank.resize(n, 0);
        let mut label = 0;
        self.rank[sa[0]] = 0;
        for i in 1..n {
            if s[sa[i]] != s[sa[i - 1]] {
                label += 1;
            }
            self.rank[sa[i]] = label;
        }
        if label == n - 1 {
            return sa;
        }

        let mut k = 1;
        while k < n {
            // Pass one orders positions by the rank at offset k. The current
            // sa is already sorted by rank, so shifting every entry left by k
            // yields exactly that order with no extra sort: positions whose
            // second key is the sentinel (i + k >= n) come first.
            let mut at = 0;
            for i in n - k..n {
                self.scratch[at] = i;
                at += 1;
            }
            for &pos in sa.iter() {
                if pos >= k {
                    self.scratch[at] = pos - k;
                    at += 1;
                }
            }

            // Pass two is a stable counting sort of that order by rank[i].
            self.counts.clear();
            self.counts.resize(n, 0);
            for &r in self.rank.iter() {
                self.counts[r] += 1;
            }
            to_bucket_starts(&mut self.counts);
            for i in 0..n {
                let pos = self.scratch[i];
                sa[self.counts[self.rank[pos]]] = pos;
                self.counts[self.rank[pos]] += 1;
            }

            // Relabel: walk the sorted order and start a new equivalence
            // class whenever the key pair changes. scratch becomes the new
            // rank array and the two are swapped afterwards.
            let mut label = 0;
            self.scratch[sa[0]] = 0;
            for i in 1..n {
                if pair_key(&self.rank, sa[i], k, n) != pair_key(&self.rank, sa[i - 1], k, n) {
                    label += 1;
                }
                self.scratch[sa[i]] = label;
            }
            std::mem::swap(&mut self.rank, &mut self.scratch);

            // All suffixes distinct, no further round can change the order.
            if label == n - 1 {
                break;
            }
            k <<= 1;
        }

        sa
    }
}

impl Default for SuffixArrayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The doubling key for position `i`: its rank plus the rank `k` bytes later.
/// Second component is shifted up by one so 0 can act as the sentinel for
/// suffixes that end before reaching offset k.
fn pair_key(rank: &[usize], i: usize, k: usize, n: usize) -> (usize, usize) {
    let second = if i + k < n { rank[i + k] + 1 } else { 0 };
    (rank[i], second)
}

/// Convert per-key counts into exclusive prefix sums (bucket start offsets).
fn to_bucket_starts(counts: &mut [usize]) {
    let mut sum = 0;
    for c in counts.iter_mut() {
        let here = *c;
        *c = sum;
        sum += here;
    }
}
