use crate::error::AnalyticsError;
use rayon::prelude::*;

/// All contiguous windows of a fixed length over a slice, stride 1.
///
/// The slicer holds only a borrow, so it can be iterated any number of times
/// and always yields the same `len()` windows in left-to-right order.
#[derive(Debug, Clone, Copy)]
pub struct WindowSlicer<'a> {
    values: &'a [f64],
    size: usize,
}

impl<'a> WindowSlicer<'a> {
    pub fn new(values: &'a [f64], size: usize) -> Result<Self, AnalyticsError> {
        if size == 0 {
            return Err(AnalyticsError::InvalidWindow(size));
        }
        if values.len() < size {
            return Err(AnalyticsError::InsufficientData {
                required: size,
                available: values.len(),
            });
        }
        Ok(Self { values, size })
    }

    pub fn window_size(&self) -> usize {
        self.size
    }

    /// Number of windows, `N - W + 1`.
    pub fn len(&self) -> usize {
        self.values.len() - self.size + 1
    }

    /// Never true: construction guarantees at least one window.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, k: usize) -> Option<&'a [f64]> {
        self.values.get(k..k + self.size)
    }

    /// Index into the source slice of the last element of window `k`.
    pub fn end_index(&self, k: usize) -> usize {
        k + self.size - 1
    }

    pub fn iter(&self) -> std::slice::Windows<'a, f64> {
        self.values.windows(self.size)
    }

    /// Applies `f` to every window and collects the results in window order.
    ///
    /// When `parallel` is set the windows are evaluated on the rayon pool; the
    /// output order is unaffected.
    pub fn map<T, F>(&self, parallel: bool, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&[f64]) -> T + Sync + Send,
    {
        if parallel {
            self.values.par_windows(self.size).map(|w| f(w)).collect()
        } else {
            self.iter().map(f).collect()
        }
    }
}

impl<'a> IntoIterator for &WindowSlicer<'a> {
    type Item = &'a [f64];
    type IntoIter = std::slice::Windows<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Windows over two equal-length slices, walked in lock step.
#[derive(Debug, Clone, Copy)]
pub struct PairedWindows<'a> {
    left: WindowSlicer<'a>,
    right: WindowSlicer<'a>,
}

impl<'a> PairedWindows<'a> {
    pub fn new(left: &'a [f64], right: &'a [f64], size: usize) -> Result<Self, AnalyticsError> {
        if left.len() != right.len() {
            return Err(AnalyticsError::InvalidSeries(format!(
                "paired windows need equal lengths, got {} and {}",
                left.len(),
                right.len()
            )));
        }
        Ok(Self {
            left: WindowSlicer::new(left, size)?,
            right: WindowSlicer::new(right, size)?,
        })
    }

    /// Number of window pairs, `N - W + 1`.
    pub fn window_count(&self) -> usize {
        self.left.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a [f64], &'a [f64])> + use<'a> {
        self.left.iter().zip(self.right.iter())
    }

    pub fn map<T, F>(&self, parallel: bool, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&[f64], &[f64]) -> T + Sync + Send,
    {
        let size = self.left.window_size();
        if parallel {
            self.left
                .values
                .par_windows(size)
                .zip(self.right.values.par_windows(size))
                .map(|(a, b)| f(a, b))
                .collect()
        } else {
            self.iter().map(|(a, b)| f(a, b)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_count_and_contents() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let slicer = WindowSlicer::new(&values, 3).unwrap();
        assert_eq!(slicer.len(), 3);
        let windows: Vec<_> = slicer.iter().collect();
        assert_eq!(windows, vec![&[1.0, 2.0, 3.0][..], &[2.0, 3.0, 4.0], &[3.0, 4.0, 5.0]]);
        assert_eq!(slicer.end_index(0), 2);
        assert_eq!(slicer.get(2), Some(&[3.0, 4.0, 5.0][..]));
        assert_eq!(slicer.get(3), None);
    }

    #[test]
    fn test_slicer_is_restartable() {
        let values = [1.0, 2.0, 3.0];
        let slicer = WindowSlicer::new(&values, 2).unwrap();
        let first: Vec<_> = slicer.iter().collect();
        let second: Vec<_> = (&slicer).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_window_larger_than_series_fails() {
        let values = [1.0, 2.0];
        assert_eq!(
            WindowSlicer::new(&values, 3).unwrap_err(),
            AnalyticsError::InsufficientData {
                required: 3,
                available: 2
            }
        );
        assert_eq!(
            WindowSlicer::new(&values, 0).unwrap_err(),
            AnalyticsError::InvalidWindow(0)
        );
    }

    #[test]
    fn test_parallel_map_preserves_order() {
        let values: Vec<f64> = (0..1000).map(f64::from).collect();
        let slicer = WindowSlicer::new(&values, 10).unwrap();
        let sequential = slicer.map(false, |w| w[0]);
        let parallel = slicer.map(true, |w| w[0]);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[0], 0.0);
        assert_eq!(parallel[990], 990.0);
    }

    #[test]
    fn test_paired_windows_align() {
        let a = [1.0, 2.0, 3.0];
        let b = [10.0, 20.0, 30.0];
        let paired = PairedWindows::new(&a, &b, 2).unwrap();
        let sums = paired.map(true, |x, y| x[1] + y[1]);
        assert_eq!(sums, vec![22.0, 33.0]);
        assert_eq!(paired.window_count(), 2);
        assert!(PairedWindows::new(&a, &b[..2], 2).is_err());
    }
}
