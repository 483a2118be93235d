use std::{collections::HashMap, fmt::Display, hash::Hash, str::FromStr};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{PlayingEvent, PrimaryKey};

/// How many entries a ranking contains at most
pub const TOP_LIMIT: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// The requested statistic does not exist
    #[error("Unknown statistic kind: {0}")]
    UnknownKind(String),
}

/// The statistic to compute over the playing events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticKind {
    Artists,
    Albums,
    Songs,
    PlayingTime,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 4] = [
        StatisticKind::Artists,
        StatisticKind::Albums,
        StatisticKind::Songs,
        StatisticKind::PlayingTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Albums => "albums",
            Self::Songs => "songs",
            Self::PlayingTime => "playing_time",
        }
    }
}

impl FromStr for StatisticKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StatsError::UnknownKind(s.to_string()))
    }
}

impl Display for StatisticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts which playing events are taken into account.
/// All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub user_id: Option<PrimaryKey>,
    /// First day included, if any
    pub from: Option<NaiveDate>,
    /// Last day included, if any
    pub to: Option<NaiveDate>,
}

impl StatsFilter {
    /// Returns true if `from` is after `to`, in which case nothing can match.
    pub fn is_empty_range(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    pub fn matches(&self, event: &PlayingEvent) -> bool {
        let day = event.playing_at.date();

        self.user_id.map_or(true, |id| event.user_id == id)
            && self.from.map_or(true, |from| day >= from)
            && self.to.map_or(true, |to| day <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistTotal {
    pub artist: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumTotal {
    pub album_id: PrimaryKey,
    pub title: String,
    pub artist: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongTotal {
    pub song_id: PrimaryKey,
    pub title: String,
    pub artist: String,
    pub time: u64,
}

/// The result of a statistic computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statistics {
    Artists(Vec<ArtistTotal>),
    Albums(Vec<AlbumTotal>),
    Songs(Vec<SongTotal>),
    /// Total seconds played
    PlayingTime(u64),
}

impl Statistics {
    pub fn kind(&self) -> StatisticKind {
        match self {
            Self::Artists(_) => StatisticKind::Artists,
            Self::Albums(_) => StatisticKind::Albums,
            Self::Songs(_) => StatisticKind::Songs,
            Self::PlayingTime(_) => StatisticKind::PlayingTime,
        }
    }
}

/// Computes a statistic over the events matching the filter.
pub fn compute_statistics(
    events: &[PlayingEvent],
    kind: StatisticKind,
    filter: &StatsFilter,
) -> Statistics {
    let matching = events.iter().filter(|e| filter.matches(e));

    match kind {
        StatisticKind::PlayingTime => {
            Statistics::PlayingTime(matching.map(|e| u64::from(e.time)).sum())
        }
        StatisticKind::Songs => {
            let totals = top_totals(
                matching,
                |e| e.song_id,
                |e| (e.song_title.clone(), e.song_artist.clone()),
            );

            Statistics::Songs(
                totals
                    .into_iter()
                    .map(|(song_id, (title, artist), time)| SongTotal {
                        song_id,
                        title,
                        artist,
                        time,
                    })
                    .collect(),
            )
        }
        StatisticKind::Albums => {
            let totals = top_totals(
                matching,
                |e| e.album_id,
                |e| (e.album_title.clone(), e.album_artist.clone()),
            );

            Statistics::Albums(
                totals
                    .into_iter()
                    .map(|(album_id, (title, artist), time)| AlbumTotal {
                        album_id,
                        title,
                        artist,
                        time,
                    })
                    .collect(),
            )
        }
        StatisticKind::Artists => {
            let totals = top_totals(matching, |e| e.song_artist.clone(), |_| ());

            Statistics::Artists(
                totals
                    .into_iter()
                    .map(|(artist, _, time)| ArtistTotal { artist, time })
                    .collect(),
            )
        }
    }
}

/// Sums the time of the events per key, and returns the [TOP_LIMIT] largest totals.
/// Equal totals are ordered by ascending key.
/// The details of a key are taken from the first event seen for it.
fn top_totals<'a, K, D, FK, FD>(
    events: impl Iterator<Item = &'a PlayingEvent>,
    key: FK,
    details: FD,
) -> Vec<(K, D, u64)>
where
    K: Eq + Hash + Ord,
    FK: Fn(&PlayingEvent) -> K,
    FD: Fn(&PlayingEvent) -> D,
{
    let mut totals: HashMap<K, (D, u64)> = HashMap::new();

    for event in events {
        let (_, time) = totals
            .entry(key(event))
            .or_insert_with(|| (details(event), 0));

        *time += u64::from(event.time);
    }

    let mut ranked: Vec<_> = totals
        .into_iter()
        .map(|(key, (details, time))| (key, details, time))
        .collect();

    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_LIMIT);
    ranked
}
