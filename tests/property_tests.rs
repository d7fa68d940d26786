//! Property tests over random event sequences.

mod common;

use common::{Match, BLACK, RED};
use proptest::prelude::*;
use rust_ctf::components::{ComponentStoreExt, FlagCarryState, VisualMarker};
use rust_ctf::core::{EntityId, MarkerKind, TeamId, Vec3};
use rust_ctf::flags::FlagLocation;

#[derive(Clone, Debug)]
enum Step {
    PickUp { player: usize, flag: usize },
    Throw { player: usize, flag: usize },
    Attack { attacker: usize, target: usize },
}

const PLAYERS: usize = 4;
const FLAGS: [TeamId; 2] = [RED, BLACK];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..PLAYERS, 0..FLAGS.len()).prop_map(|(player, flag)| Step::PickUp { player, flag }),
        (0..PLAYERS, 0..FLAGS.len()).prop_map(|(player, flag)| Step::Throw { player, flag }),
        (0..PLAYERS, 0..PLAYERS).prop_map(|(attacker, target)| Step::Attack { attacker, target }),
    ]
}

struct Cast {
    players: Vec<EntityId>,
    flags: Vec<EntityId>,
}

/// Players alternate red/black, starting with red; the first two are armed.
fn cast(m: &Match) -> Cast {
    let players = (0..PLAYERS)
        .map(|i| {
            let team = if i % 2 == 0 { RED } else { BLACK };
            let player = m.player(team, Vec3::new(i as f32, 23.0, 0.0));
            if i < 2 {
                m.arm(player);
            }
            player
        })
        .collect();
    let flags = FLAGS.iter().map(|&team| m.flag_item(team)).collect();
    Cast { players, flags }
}

fn run(m: &Match, cast: &Cast, step: &Step) {
    match *step {
        Step::PickUp { player, flag } => {
            let (player, item) = (cast.players[player], cast.flags[flag]);
            if m.inventory.count_of(player, item) == 0 {
                m.pick_up(player, item);
            }
        }
        Step::Throw { player, flag } => {
            let (player, item) = (cast.players[player], cast.flags[flag]);
            if m.inventory.count_of(player, item) > 0 {
                m.throw_away(player, item);
            }
        }
        Step::Attack { attacker, target } => m.attack(cast.players[attacker], cast.players[target]),
    }
}

proptest! {
    #[test]
    fn prop_carry_state_matches_engine(steps in prop::collection::vec(step(), 1..40)) {
        let m = Match::new();
        let cast = cast(&m);

        for step in &steps {
            run(&m, &cast, step);
            m.assert_consistent(&cast.players);
        }
    }

    #[test]
    fn prop_history_is_sequenced(steps in prop::collection::vec(step(), 1..40)) {
        let m = Match::new();
        let cast = cast(&m);
        for step in &steps {
            run(&m, &cast, step);
        }

        for team in FLAGS {
            let history = m.game.engine().history(team).unwrap();
            let mut previous = None;
            for (i, record) in history.iter().enumerate() {
                prop_assert_eq!(record.sequence, i as u64 + 1);
                prop_assert_eq!(record.team, team);
                prop_assert_ne!(record.from, record.to);
                if let Some(to) = previous {
                    prop_assert_eq!(record.from, to);
                }
                previous = Some(record.to);
            }
            prop_assert_eq!(previous.unwrap_or(m.location(team)), m.location(team));
        }
    }

    #[test]
    fn prop_unarmed_attack_never_changes_carry(
        steps in prop::collection::vec(step(), 0..20),
        attacker in 2..PLAYERS,
        target in 0..PLAYERS,
    ) {
        let m = Match::new();
        let cast = cast(&m);
        for step in &steps {
            run(&m, &cast, step);
        }

        let target = cast.players[target];
        let before = m.store.get::<FlagCarryState>(target);
        m.attack(cast.players[attacker], target);
        prop_assert_eq!(m.store.get::<FlagCarryState>(target), before);
    }

    #[test]
    fn prop_enemy_pickup_of_free_flag_assigns_carry(player in 0..PLAYERS) {
        let m = Match::new();
        let cast = cast(&m);
        let player_id = cast.players[player];
        let (enemy, marker) = if player % 2 == 0 { (1, MarkerKind::Spades) } else { (0, MarkerKind::Hearts) };

        m.pick_up(player_id, cast.flags[enemy]);

        prop_assert_eq!(m.store.get::<FlagCarryState>(player_id), Some(FlagCarryState::new(FLAGS[enemy])));
        prop_assert_eq!(m.store.get::<VisualMarker>(player_id), Some(VisualMarker::new(marker)));
        prop_assert_eq!(m.location(FLAGS[enemy]), FlagLocation::Carried { by: player_id });
    }

    #[test]
    fn prop_own_flag_pickup_always_returns(
        steps in prop::collection::vec(step(), 0..20),
        player in 0..PLAYERS,
    ) {
        let m = Match::new();
        let cast = cast(&m);
        for step in &steps {
            run(&m, &cast, step);
        }

        let own = player % 2;
        let player_id = cast.players[player];
        let item = cast.flags[own];
        let held = m.inventory.count_of(player_id, item);

        m.pick_up(player_id, item);

        prop_assert!(m.location(FLAGS[own]).is_at_base());
        prop_assert_eq!(m.inventory.count_of(player_id, item), held);
        m.assert_consistent(&cast.players);
    }
}
