//! Group listing shown when a recruitment starts

use super::render::{self, LINEUP_COLOR, LINEUP_TITLE};
use super::roster::Roster;
use crate::error::BotError;
use crate::grouping::Partition;
use rand::Rng;
use twilight_model::channel::message::embed::Embed;
use twilight_model::id::{marker::UserMarker, Id};

/// Roster members shuffled and split into groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineup {
    partition: Partition<Id<UserMarker>>,
}

impl Lineup {
    /// Shuffle the roster with `rng` and group it.
    ///
    /// An empty roster has nobody to group and is rejected; a single member
    /// forms a group of one.
    pub fn from_roster<R>(roster: &Roster, rng: &mut R) -> Result<Self, BotError>
    where
        R: Rng + ?Sized,
    {
        if roster.is_empty() {
            return Err(BotError::NoParticipants);
        }
        Ok(Self {
            partition: Partition::shuffled(roster.member_ids().to_vec(), rng),
        })
    }

    pub fn groups(&self) -> &[Vec<Id<UserMarker>>] {
        self.partition.groups()
    }

    pub fn participant_count(&self) -> usize {
        self.partition.participant_count()
    }

    /// One field per group: `"{n}組. ({size}人)"` over quoted mention lines.
    pub fn embed(&self) -> Embed {
        let fields = self
            .groups()
            .iter()
            .enumerate()
            .map(|(idx, group)| {
                let members = group
                    .iter()
                    .map(|&id| render::mention_line(id))
                    .collect::<Vec<_>>()
                    .join("\n");
                render::field(format!("{}組. ({}人)", idx + 1, group.len()), members)
            })
            .collect();
        render::embed(LINEUP_TITLE, LINEUP_COLOR, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster_of(count: u64) -> Roster {
        let mut roster = Roster::started_by(Id::new(1));
        for id in 2..=count {
            roster.add(Id::new(id), true).unwrap();
        }
        roster
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Lineup::from_roster(&Roster::default(), &mut rng).unwrap_err();
        assert!(matches!(err, BotError::NoParticipants));
    }

    #[test]
    fn test_single_member_forms_one_group() {
        let mut rng = StdRng::seed_from_u64(1);
        let lineup = Lineup::from_roster(&roster_of(1), &mut rng).unwrap();
        assert_eq!(lineup.groups(), &[vec![Id::<UserMarker>::new(1)]]);
    }

    #[test]
    fn test_lineup_groups_everyone() {
        let mut rng = StdRng::seed_from_u64(12345);
        let roster = roster_of(10);
        let lineup = Lineup::from_roster(&roster, &mut rng).unwrap();

        let sizes: Vec<usize> = lineup.groups().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(lineup.participant_count(), 10);

        let mut ids: Vec<u64> = lineup.groups().iter().flatten().map(|id| id.get()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_embed_layout() {
        let mut rng = StdRng::seed_from_u64(3);
        let lineup = Lineup::from_roster(&roster_of(7), &mut rng).unwrap();
        let embed = lineup.embed();

        assert_eq!(embed.title.as_deref(), Some(LINEUP_TITLE));
        assert_eq!(embed.color, Some(LINEUP_COLOR));
        assert_eq!(embed.fields.len(), 2);
        assert_eq!(embed.fields[0].name, "1組. (4人)");
        assert_eq!(embed.fields[1].name, "2組. (3人)");
        assert_eq!(embed.fields[0].value.lines().count(), 4);
        assert!(embed.fields[1]
            .value
            .lines()
            .all(|line| render::parse_mention_line(line).is_some()));
    }

    #[test]
    fn test_largest_roster_fits_one_embed() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [97, 98, 99, 100] {
            let lineup = Lineup::from_roster(&roster_of(count), &mut rng).unwrap();
            let fields = lineup.embed().fields.len();
            assert!(fields <= render::MAX_FIELDS, "{count} members need {fields} fields");
        }
        assert_eq!(crate::recruitment::MAX_MEMBERS, 100);
    }

    #[test]
    fn test_lineup_is_not_a_roster() {
        let mut rng = StdRng::seed_from_u64(3);
        let lineup = Lineup::from_roster(&roster_of(5), &mut rng).unwrap();
        assert!(Roster::from_embeds(&[lineup.embed()]).is_none());
    }
}
