//! One-based, fully-closed spans of positions.
//!
//! Every coordinate in this crate follows the convention of the annotation
//! interchange format: the first base of a sequence is position `1` and both
//! ends of a span are included.

/// An error related to a [`Span`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The start position was zero, which does not exist in a one-based
    /// coordinate system.
    ZeroStart,

    /// The start position came after the end position.
    StartAfterEnd(u64, u64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroStart => write!(f, "positions are one-based, but the start was zero"),
            Error::StartAfterEnd(start, end) => {
                write!(f, "the start ({start}) is greater than the end ({end})")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A one-based, fully-closed span of positions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Span {
    /// The first position within the span.
    start: u64,

    /// The last position within the span.
    end: u64,
}

impl Span {
    /// Attempts to create a new [`Span`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::span::Span;
    ///
    /// let span = Span::try_new(600, 1300)?;
    /// assert_eq!(span.start(), 600);
    /// assert_eq!(span.end(), 1300);
    ///
    /// assert!(Span::try_new(0, 10).is_err());
    /// assert!(Span::try_new(10, 9).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: u64, end: u64) -> Result<Self> {
        if start == 0 {
            return Err(Error::ZeroStart);
        }

        if start > end {
            return Err(Error::StartAfterEnd(start, end));
        }

        Ok(Self { start, end })
    }

    /// Gets the first position within the span.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the last position within the span.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Gets the number of positions covered by the span.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::span::Span;
    ///
    /// assert_eq!(Span::try_new(1, 1)?.len(), 1);
    /// assert_eq!(Span::try_new(501, 1200)?.len(), 700);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Returns whether `position` falls within the span.
    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position <= self.end
    }

    /// Returns the overlapping portion of two spans, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::span::Span;
    ///
    /// let a = Span::try_new(501, 1200)?;
    /// let b = Span::try_new(600, 1300)?;
    /// assert_eq!(a.intersect(&b), Some(Span::try_new(600, 1200)?));
    ///
    /// let c = Span::try_new(1201, 1500)?;
    /// assert_eq!(a.intersect(&c), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn intersect(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        match start <= end {
            true => Some(Span { start, end }),
            false => None,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
