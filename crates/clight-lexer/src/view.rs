/// A borrowed window over the unread tail of a line.
///
/// The view only ever shrinks from the left, so it is always a suffix of
/// the buffer it was created from. Positions are recovered with
/// [`TextView::offset_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextView<'a> {
    data: &'a [u8],
}

impl<'a> TextView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Remaining bytes in the window.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn first(&self) -> Option<u8> {
        self.data.first().copied()
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.data.starts_with(prefix)
    }

    /// Skip leading spaces and tabs.
    #[must_use]
    pub fn trim_left(self) -> Self {
        let skip = self
            .data
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        self.advance(skip)
    }

    /// Drop `n` bytes from the front, stopping at exhaustion.
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        let n = n.min(self.data.len());
        Self {
            data: &self.data[n..],
        }
    }

    /// Advance to the next `\n` (not consumed) or to the end of the window.
    #[must_use]
    pub fn skip_line(self) -> Self {
        let n = self
            .data
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(self.data.len());
        self.advance(n)
    }

    /// Split off the longest prefix whose bytes satisfy `pred`.
    pub fn split_while(self, pred: impl Fn(u8) -> bool) -> (&'a [u8], Self) {
        let n = self.data.iter().take_while(|&&b| pred(b)).count();
        (&self.data[..n], self.advance(n))
    }

    /// Byte offset of this view's start inside `origin`.
    ///
    /// `self` must have been derived from `origin` by advancing.
    pub fn offset_in(&self, origin: &TextView<'a>) -> usize {
        debug_assert!(self.len() <= origin.len(), "view is not a suffix of origin");
        origin.len() - self.len()
    }
}
