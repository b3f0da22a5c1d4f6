//! Roster lifecycle as seen through message embeds
//!
//! State is only ever carried in embeds, so each step encodes the roster,
//! decodes it again and continues from the decoded copy.

use grouping_bot::error::BotError;
use grouping_bot::recruitment::render::{LINEUP_TITLE, ROSTER_TITLE};
use grouping_bot::recruitment::{Lineup, Roster, MAX_MEMBERS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use twilight_model::id::{marker::UserMarker, Id};

fn user(id: u64) -> Id<UserMarker> {
    Id::new(id)
}

fn reload(roster: &Roster) -> Roster {
    Roster::from_embeds(&[roster.embed()]).expect("roster embed should decode")
}

#[test]
fn join_cancel_start_round() {
    let mut roster = Roster::started_by(user(100));

    for id in 101..=110 {
        roster = reload(&roster);
        roster.add(user(id), true).unwrap();
    }

    roster = reload(&roster);
    assert!(matches!(
        roster.add(user(105), true),
        Err(BotError::AlreadyJoined { user_id: 105 })
    ));

    roster.remove(user(100), true).unwrap();
    roster = reload(&roster);
    assert!(matches!(
        roster.remove(user(100), true),
        Err(BotError::NotJoined { user_id: 100 })
    ));
    assert_eq!(roster.len(), 10);

    let lineup = Lineup::from_roster(&roster, &mut StdRng::seed_from_u64(5)).unwrap();
    let embed = lineup.embed();
    assert_eq!(embed.title.as_deref(), Some(LINEUP_TITLE));

    let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["1組. (4人)", "2組. (3人)", "3組. (3人)"]);

    let listed: usize = embed.fields.iter().map(|f| f.value.lines().count()).sum();
    assert_eq!(listed, 10);
}

#[test]
fn withdrawing_everyone_blocks_start() {
    let mut roster = Roster::started_by(user(1));
    roster.remove(user(1), true).unwrap();

    let roster = reload(&roster);
    assert!(roster.is_empty());
    assert_eq!(roster.embed().title.as_deref(), Some(ROSTER_TITLE));
    assert!(matches!(
        Lineup::from_roster(&roster, &mut StdRng::seed_from_u64(1)),
        Err(BotError::NoParticipants)
    ));
}

#[test]
fn five_players_split_three_two() {
    let mut roster = Roster::started_by(user(1));
    for id in 2..=5 {
        roster.add(user(id), true).unwrap();
    }
    let lineup = Lineup::from_roster(&roster, &mut StdRng::seed_from_u64(9)).unwrap();
    let sizes: Vec<usize> = lineup.groups().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 2]);
}

#[test]
fn every_roster_size_stays_postable() {
    // realistic snowflakes, so mention lines have their full width
    let base = 400_000_000_000_000_000_u64;
    let mut roster = Roster::started_by(user(base));

    for id in 1..MAX_MEMBERS as u64 {
        roster = reload(&roster);
        roster.add(user(base + id), true).unwrap();

        let embed = roster.embed();
        if let Err(e) = twilight_validate::embed::embed(&embed) {
            panic!("roster of {} rejected: {e}", roster.len());
        }

        let lineup = Lineup::from_roster(&roster, &mut StdRng::seed_from_u64(id)).unwrap();
        if let Err(e) = twilight_validate::embed::embed(&lineup.embed()) {
            panic!("lineup of {} rejected: {e}", roster.len());
        }
    }

    assert_eq!(roster.len(), MAX_MEMBERS);
    assert!(matches!(
        reload(&roster).add(user(base + 10_000), true),
        Err(BotError::RosterFull { max }) if max == MAX_MEMBERS
    ));
}
