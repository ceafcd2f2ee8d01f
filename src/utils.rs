// Utility functions

/// Rounds to `places` decimals, halves away from zero. Values too large to
/// scale are returned unchanged; they carry no fractional part anyway.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Arithmetic mean that stays finite for finite inputs.
///
/// The plain `sum / count` is used while the sum is finite. Once it
/// overflows, the incrementally scaled mean (`m += x/k - m/k`) is reported
/// instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mean {
    sum: f64,
    scaled: f64,
    count: usize,
}

impl Mean {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let k = self.count as f64;
        self.sum += value;
        self.scaled += value / k - self.scaled / k;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` when nothing was pushed.
    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else if self.sum.is_finite() {
            Some(self.sum / self.count as f64)
        } else {
            Some(self.scaled)
        }
    }
}

impl FromIterator<f64> for Mean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut mean = Mean::default();
        for value in iter {
            mean.push(value);
        }
        mean
    }
}

/// Integer percentage of `count` in `total`; 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Converts a display name into a kebab-case file stem.
pub fn to_kebab_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.trim().to_lowercase().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
