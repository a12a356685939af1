//! Player ranks as a share of the round's maximum score

/// Rank names, threshold percentages of the max score, and icons, ascending
const RANKS: [(&str, u32, &str); 9] = [
    ("baguhan", 0, "🥚"),
    ("nagsisimula", 1, "🐣"),
    ("umuusad", 3, "🐥"),
    ("magaling", 5, "🐤"),
    ("mahusay", 10, "🐔"),
    ("bihasa", 20, "🦅"),
    ("dalubhasa", 30, "🦉"),
    ("henyo", 45, "🐝"),
    ("alamat", 60, "👑"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub index: usize,
    pub name: &'static str,
    /// Share of the max score needed, in percent
    pub percentage: u32,
    pub icon: &'static str,
}

impl Rank {
    fn at(index: usize) -> Option<Self> {
        RANKS.get(index).map(|&(name, percentage, icon)| Self {
            index,
            name,
            percentage,
            icon,
        })
    }

    /// Every rank, lowest first
    pub fn all() -> impl Iterator<Item = Self> {
        (0..RANKS.len()).filter_map(Self::at)
    }

    /// Points needed to reach this rank when the round is worth `max_score`
    #[must_use]
    pub fn threshold_score(self, max_score: u32) -> u32 {
        let needed = (u64::from(self.percentage) * u64::from(max_score)).div_ceil(100);
        u32::try_from(needed).unwrap_or(u32::MAX)
    }
}

/// Highest rank whose threshold `score` has reached
///
/// Returns `None` when `max_score` is zero, since no share can be computed.
///
/// # Examples
/// ```
/// use salita::hex::rank;
///
/// assert_eq!(rank(0, 100).unwrap().name, "baguhan");
/// assert_eq!(rank(60, 100).unwrap().name, "alamat");
/// assert!(rank(5, 0).is_none());
/// ```
#[must_use]
pub fn rank(score: u32, max_score: u32) -> Option<Rank> {
    if max_score == 0 {
        return None;
    }
    let scaled = u64::from(score) * 100;
    let index = RANKS
        .iter()
        .rposition(|&(_, percentage, _)| scaled >= u64::from(percentage) * u64::from(max_score))
        .unwrap_or(0);
    Rank::at(index)
}

/// The rank after the current one and the points still missing to reach it
///
/// `None` at the top rank or when `max_score` is zero.
#[must_use]
pub fn next_rank(score: u32, max_score: u32) -> Option<(Rank, u32)> {
    let current = rank(score, max_score)?;
    let next = Rank::at(current.index + 1)?;
    Some((next, next.threshold_score(max_score).saturating_sub(score)))
}
