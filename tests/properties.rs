// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod common;

use botify::Scope;
use proptest::prelude::*;

use common::{session, song_paths};

fn names(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("song {i}")).collect()
}

proptest! {
    #[test]
    fn loop_scope_cycles_back_to_first_song(len in 1usize..40) {
        let names = names(len);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut session = session();
        session.add_songs(song_paths(&names)).unwrap();
        session.set_loop_scope(true);
        session.set_shuffle(false);
        prop_assert_eq!(session.engine().current_index(), Some(0));

        let mut seen = vec![false; len];
        for _ in 0..len {
            session.next().unwrap();
            if let Some(index) = session.engine().current_index() {
                seen[index] = true;
            }
        }

        prop_assert_eq!(session.engine().current_index(), Some(0));
        prop_assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn repeated_membership_leaves_playlist_length_unchanged(
        len in 1usize..10,
        picks in proptest::collection::vec(0usize..10, 1..30),
    ) {
        let names = names(len);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut session = session();
        let ids = session.add_songs(song_paths(&names)).unwrap();
        let playlist = session.create_playlist("Mix").unwrap();

        for pick in &picks {
            let id = ids[pick % len];
            let before = session.library().playlist(playlist).unwrap().song_ids().len();
            let added = session.add_song_to_playlist(id, playlist);
            let after = session.library().playlist(playlist).unwrap().song_ids().len();

            prop_assert_eq!(after, if added { before + 1 } else { before });
            prop_assert!(!added || before < len);
        }

        let mut members = session.library().playlist(playlist).unwrap().song_ids().to_vec();
        members.sort();
        members.dedup();
        let stored = session.library().playlist(playlist).unwrap().song_ids().len();
        prop_assert_eq!(members.len(), stored);
    }

    #[test]
    fn scope_switch_always_clears_index(len in 1usize..10, index in 0usize..10) {
        let names = names(len);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut session = session();
        session.add_songs(song_paths(&names)).unwrap();
        session.play(index % len).unwrap();

        session.select_scope(Scope::All);

        prop_assert_eq!(session.engine().current_index(), None);
    }

    #[test]
    fn previous_past_threshold_restarts_in_place(
        len in 1usize..10,
        index in 0usize..10,
        pos in 3.01f64..600.0,
    ) {
        let names = names(len);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut session = session();
        session.add_songs(song_paths(&names)).unwrap();
        session.play(index % len).unwrap();
        session.update_position(pos);

        session.previous().unwrap();

        prop_assert_eq!(session.engine().current_index(), Some(index % len));
        prop_assert_eq!(session.engine().position(), 0.0);
    }
}
