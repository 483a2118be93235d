use std::{collections::HashMap, hash::Hash};

use crate::{
    Album, AlbumSongRow, AlbumWithSongs, Playlist, PlaylistSongRow, PlaylistWithSongs, PrimaryKey,
    Song,
};

/// A parent collapsed from one or more flat rows, along with the children each row contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folded<P, C> {
    pub parent: P,
    pub children: Vec<C>,
}

/// Folds flat joined rows into parents carrying their children.
///
/// - Parents are emitted in the order their key is first seen.
/// - The first row of a key supplies the parent.
/// - Every row, including the first, contributes one child, in the order the rows arrive.
/// - Keys that never appear in `rows` never appear in the output.
///
/// Runs in a single pass. The key index only stores positions into the output,
/// so the output order never depends on the map's iteration order.
pub fn fold_hierarchy<R, K, P, C, FK, FP, FC>(
    rows: impl IntoIterator<Item = R>,
    key: FK,
    parent: FP,
    child: FC,
) -> Vec<Folded<P, C>>
where
    K: Eq + Hash,
    FK: Fn(&R) -> K,
    FP: Fn(&R) -> P,
    FC: Fn(R) -> C,
{
    let rows = rows.into_iter();
    let (lower_bound, _) = rows.size_hint();

    let mut folded: Vec<Folded<P, C>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::with_capacity(lower_bound);

    for row in rows {
        let position = *index.entry(key(&row)).or_insert_with(|| {
            folded.push(Folded {
                parent: parent(&row),
                children: vec![],
            });

            folded.len() - 1
        });

        folded[position].children.push(child(row));
    }

    folded
}

/// A flat row that can be split into a parent part and a child part.
pub trait FoldRow: Sized {
    type Key: Eq + Hash;
    type Parent;
    type Child;

    fn key(&self) -> Self::Key;
    fn parent(&self) -> Self::Parent;
    fn into_child(self) -> Self::Child;
}

/// Folds rows using their [FoldRow] implementation.
pub fn fold_rows<R>(rows: impl IntoIterator<Item = R>) -> Vec<Folded<R::Parent, R::Child>>
where
    R: FoldRow,
{
    fold_hierarchy(rows, R::key, R::parent, R::into_child)
}

impl FoldRow for AlbumSongRow {
    type Key = PrimaryKey;
    type Parent = Album;
    type Child = Song;

    fn key(&self) -> Self::Key {
        self.album_id
    }

    fn parent(&self) -> Self::Parent {
        Album {
            id: self.album_id,
            title: self.album_title.clone(),
            artist: self.album_artist.clone(),
            release_date: self.release_date,
        }
    }

    fn into_child(self) -> Self::Child {
        Song {
            id: self.song_id,
            title: self.song_title,
            artist: self.song_artist,
            album_id: self.album_id,
        }
    }
}

impl FoldRow for PlaylistSongRow {
    type Key = PrimaryKey;
    type Parent = Playlist;
    type Child = Song;

    fn key(&self) -> Self::Key {
        self.playlist_id
    }

    fn parent(&self) -> Self::Parent {
        Playlist {
            id: self.playlist_id,
            title: self.playlist_title.clone(),
            author: self.author.clone(),
        }
    }

    fn into_child(self) -> Self::Child {
        Song {
            id: self.song_id,
            title: self.song_title,
            artist: self.song_artist,
            album_id: self.album_id,
        }
    }
}

impl From<Folded<Album, Song>> for AlbumWithSongs {
    fn from(folded: Folded<Album, Song>) -> Self {
        Self {
            album: folded.parent,
            songs: folded.children,
        }
    }
}

impl From<Folded<Playlist, Song>> for PlaylistWithSongs {
    fn from(folded: Folded<Playlist, Song>) -> Self {
        Self {
            playlist: folded.parent,
            songs: folded.children,
        }
    }
}

/// Folds the album listing into albums with their songs.
pub fn fold_albums(rows: Vec<AlbumSongRow>) -> Vec<AlbumWithSongs> {
    fold_rows(rows).into_iter().map(Into::into).collect()
}

/// Folds the playlist listing into playlists with their songs.
/// The rows must already be sorted by position within each playlist.
pub fn fold_playlists(rows: Vec<PlaylistSongRow>) -> Vec<PlaylistWithSongs> {
    fold_rows(rows).into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;

    fn album_row(album_id: PrimaryKey, song_id: PrimaryKey, song_title: &str) -> AlbumSongRow {
        AlbumSongRow {
            album_id,
            album_title: format!("Album {album_id}"),
            album_artist: "Queen".to_string(),
            release_date: NaiveDate::from_ymd_opt(1975, 7, 16).unwrap(),
            song_id,
            song_title: song_title.to_string(),
            song_artist: "Queen".to_string(),
        }
    }

    fn playlist_row(playlist_id: PrimaryKey, song_id: PrimaryKey) -> PlaylistSongRow {
        PlaylistSongRow {
            playlist_id,
            playlist_title: format!("Playlist {playlist_id}"),
            author: "John Doe".to_string(),
            song_id,
            song_title: format!("Song {song_id}"),
            song_artist: "Led Zeppelin".to_string(),
            album_id: 2,
        }
    }

    fn song_ids(songs: &[Song]) -> Vec<PrimaryKey> {
        songs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_empty_input() {
        let albums = fold_albums(vec![]);
        assert!(albums.is_empty());

        let folded = fold_hierarchy(Vec::<(u8, u8)>::new(), |r: &(u8, u8)| r.0, |r| r.0, |r| r.1);
        assert!(folded.is_empty());
    }

    #[test]
    fn test_groups_children_under_first_seen_parent() {
        let rows = vec![
            album_row(1, 1, "Bohemian Rhapsody"),
            album_row(1, 2, "You're My Best Friend"),
            album_row(2, 4, "Black Dog"),
            album_row(1, 3, "Love of My Life"),
        ];

        let albums = fold_albums(rows);

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].album.id, 1);
        assert_eq!(albums[0].album.title, "Album 1");
        assert_eq!(song_ids(&albums[0].songs), vec![1, 2, 3]);
        assert_eq!(albums[1].album.id, 2);
        assert_eq!(song_ids(&albums[1].songs), vec![4]);
    }

    #[test]
    fn test_first_seen_order() {
        // P1 is first seen at index 0, P2 at index 3, with later interleaving.
        let rows: Vec<(u32, char)> = vec![(1, 'a'), (1, 'b'), (1, 'c'), (2, 'd'), (1, 'e'), (2, 'f')];

        let folded = fold_hierarchy(rows, |r: &(u32, char)| r.0, |r| r.0, |r| r.1);
        let parents: Vec<_> = folded.iter().map(|f| f.parent).collect();

        assert_eq!(parents, vec![1, 2]);
        assert_eq!(folded[0].children, vec!['a', 'b', 'c', 'e']);
        assert_eq!(folded[1].children, vec!['d', 'f']);
    }

    #[test]
    fn test_first_row_supplies_parent_attributes() {
        let rows: Vec<(u32, &str)> = vec![(7, "first"), (7, "second")];

        let folded = fold_hierarchy(rows, |r: &(u32, &str)| r.0, |r| r.1, |r| r.1);

        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].parent, "first");
        assert_eq!(folded[0].children, vec!["first", "second"]);
    }

    #[test]
    fn test_no_orphan_parents() {
        let rows = vec![album_row(3, 7, "Thriller"), album_row(3, 8, "Beat It")];

        let albums = fold_albums(rows);

        assert!(albums.iter().all(|a| a.album.id == 3));
        assert!(!albums.iter().any(|a| a.album.id == 1));
    }

    #[test]
    fn test_playlist_position_fidelity() {
        // Already sorted by position, which differs from song id order.
        let rows = vec![
            playlist_row(1, 3),
            playlist_row(1, 6),
            playlist_row(1, 4),
            playlist_row(2, 2),
            playlist_row(2, 9),
            playlist_row(2, 3),
        ];

        let playlists = fold_playlists(rows);

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].playlist.author, "John Doe");
        assert_eq!(song_ids(&playlists[0].songs), vec![3, 6, 4]);
        assert_eq!(song_ids(&playlists[1].songs), vec![2, 9, 3]);
    }

    #[test]
    fn test_folding_is_deterministic() {
        let rows = vec![
            album_row(2, 4, "Black Dog"),
            album_row(1, 1, "Bohemian Rhapsody"),
            album_row(2, 5, "Rock and Roll"),
            album_row(1, 2, "You're My Best Friend"),
        ];

        assert_eq!(fold_albums(rows.clone()), fold_albums(rows));
    }

    #[test]
    fn test_null_key_is_its_own_group() {
        let rows = vec![(Some(1), 'a'), (None, 'b'), (Some(1), 'c'), (None, 'd')];

        let folded = fold_hierarchy(rows, |r: &(Option<u32>, char)| r.0, |r| r.0, |r| r.1);

        assert_eq!(folded.len(), 2);
        assert_eq!(folded[0].parent, Some(1));
        assert_eq!(folded[0].children, vec!['a', 'c']);
        assert_eq!(folded[1].parent, None);
        assert_eq!(folded[1].children, vec!['b', 'd']);
    }
}
